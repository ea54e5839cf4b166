//! Usage record data model
//!
//! The record remembers, per orientation, which images have already been put
//! on screen and on which day the last rotation ran.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Date format used for `last_update`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `last_update` of a record that never rotated
pub const EPOCH_DATE: &str = "1970-01-01";

/// Screen orientation, derived from screen dimensions on every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Portrait screens are strictly taller than wide; square screens count as landscape.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width < height {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Used images in usage order, one list per orientation
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    #[serde(default)]
    pub horizontal: Vec<String>,
    #[serde(default)]
    pub vertical: Vec<String>,
}

impl ImageSet {
    pub fn for_orientation(&self, orientation: Orientation) -> &[String] {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    pub fn for_orientation_mut(&mut self, orientation: Orientation) -> &mut Vec<String> {
        match orientation {
            Orientation::Horizontal => &mut self.horizontal,
            Orientation::Vertical => &mut self.vertical,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub images: ImageSet,
    pub last_update: String,
}

impl Default for UsageRecord {
    fn default() -> Self {
        Self {
            images: ImageSet::default(),
            last_update: EPOCH_DATE.to_string(),
        }
    }
}

/// Why a stored record could not be used as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultsReason {
    /// No record file for this device yet
    Missing,
    /// The file exists but is not a usable record
    Corrupt(String),
}

impl fmt::Display for DefaultsReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultsReason::Missing => f.write_str("no record stored yet"),
            DefaultsReason::Corrupt(why) => write!(f, "stored record is unreadable: {}", why),
        }
    }
}

/// Outcome of decoding a stored record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredRecord {
    Valid(UsageRecord),
    Defaults(DefaultsReason),
}

impl StoredRecord {
    /// Decode record JSON field by field.
    ///
    /// Only a document that is not a JSON object at all falls back to defaults.
    /// Inside an object every field is checked on its own: missing or malformed
    /// fields take their default value and the rest of the record is kept.
    pub fn decode(contents: &str) -> Self {
        let value: Value = match serde_json::from_str(contents) {
            Ok(value) => value,
            Err(e) => return StoredRecord::Defaults(DefaultsReason::Corrupt(e.to_string())),
        };

        let Some(fields) = value.as_object() else {
            return StoredRecord::Defaults(DefaultsReason::Corrupt(
                "top level is not an object".to_string(),
            ));
        };

        let images = fields.get("images");
        let record = UsageRecord {
            images: ImageSet {
                horizontal: string_list(images.and_then(|i| i.get("horizontal"))),
                vertical: string_list(images.and_then(|i| i.get("vertical"))),
            },
            last_update: fields
                .get("last_update")
                .and_then(Value::as_str)
                .filter(|date| is_valid_date(date))
                .unwrap_or(EPOCH_DATE)
                .to_string(),
        };

        StoredRecord::Valid(record)
    }

    pub fn into_record(self) -> UsageRecord {
        match self {
            StoredRecord::Valid(record) => record,
            StoredRecord::Defaults(_) => UsageRecord::default(),
        }
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub fn is_valid_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, DATE_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_classification() {
        assert_eq!(Orientation::from_dimensions(1080, 1920), Orientation::Vertical);
        assert_eq!(Orientation::from_dimensions(1920, 1080), Orientation::Horizontal);
        assert_eq!(Orientation::from_dimensions(1200, 1200), Orientation::Horizontal);
    }

    #[test]
    fn test_fresh_record_uses_epoch() {
        let record = UsageRecord::default();
        assert_eq!(record.last_update, "1970-01-01");
        assert!(record.images.horizontal.is_empty());
        assert!(record.images.vertical.is_empty());
    }

    #[test]
    fn test_decode_complete_record() {
        let json = r#"{
            "images": {"horizontal": ["/a.jpg", "/b.png"], "vertical": ["/c.jpeg"]},
            "last_update": "2024-03-01"
        }"#;
        let record = StoredRecord::decode(json).into_record();
        assert_eq!(record.images.horizontal, vec!["/a.jpg", "/b.png"]);
        assert_eq!(record.images.vertical, vec!["/c.jpeg"]);
        assert_eq!(record.last_update, "2024-03-01");
    }

    #[test]
    fn test_decode_tolerates_missing_and_bad_fields() {
        let json = r#"{
            "images": {"horizontal": ["/a.jpg", 42, null], "vertical": "nope"},
            "last_update": "yesterday",
            "extra": true
        }"#;
        match StoredRecord::decode(json) {
            StoredRecord::Valid(record) => {
                assert_eq!(record.images.horizontal, vec!["/a.jpg"]);
                assert!(record.images.vertical.is_empty());
                assert_eq!(record.last_update, EPOCH_DATE);
            }
            other => panic!("expected a valid record, got {:?}", other),
        }

        let record = StoredRecord::decode("{}").into_record();
        assert_eq!(record, UsageRecord::default());
    }

    #[test]
    fn test_decode_garbage_falls_back_to_defaults() {
        assert!(matches!(
            StoredRecord::decode("{not json"),
            StoredRecord::Defaults(DefaultsReason::Corrupt(_))
        ));
        assert!(matches!(
            StoredRecord::decode("[1, 2, 3]"),
            StoredRecord::Defaults(DefaultsReason::Corrupt(_))
        ));
        assert_eq!(
            StoredRecord::decode("").into_record(),
            UsageRecord::default()
        );
    }

    #[test]
    fn test_serialized_shape() {
        let mut record = UsageRecord::default();
        record.images.vertical.push("/v.png".to_string());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["images"]["horizontal"], serde_json::json!([]));
        assert_eq!(value["images"]["vertical"], serde_json::json!(["/v.png"]));
        assert_eq!(value["last_update"], "1970-01-01");
    }
}
