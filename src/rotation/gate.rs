//! Daily gate: at most one rotation per local calendar day.

use chrono::Local;

use super::record::{DATE_FORMAT, UsageRecord};

/// Today's date on the operator's local calendar, `YYYY-MM-DD`
pub fn today_local() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

pub fn should_run(record: &UsageRecord, today: &str) -> bool {
    record.last_update != today
}

pub fn mark_ran(record: &mut UsageRecord, today: &str) {
    record.last_update = today.to_string();
}
