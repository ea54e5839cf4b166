//! Selection engine
//!
//! Candidate images that have not been used yet for an orientation. Once the
//! pool is exhausted the whole pool is offered again; history is never reset,
//! so a later `mark_used` may append an image that is already listed.

use rand::Rng;
use rand::seq::IteratorRandom;
use std::collections::BTreeSet;

use super::record::{Orientation, UsageRecord};

/// `all_images - used`, or `all_images` when nothing would be left.
pub fn available<'a, U>(all_images: &BTreeSet<String>, used: U) -> BTreeSet<String>
where
    U: IntoIterator<Item = &'a String>,
{
    let used: BTreeSet<&String> = used.into_iter().collect();
    let remaining: BTreeSet<String> = all_images
        .iter()
        .filter(|image| !used.contains(image))
        .cloned()
        .collect();

    if remaining.is_empty() {
        all_images.clone()
    } else {
        remaining
    }
}

/// Available pool for `orientation` according to `record`.
pub fn available_for(
    record: &UsageRecord,
    all_images: &BTreeSet<String>,
    orientation: Orientation,
) -> BTreeSet<String> {
    available(all_images, record.images.for_orientation(orientation))
}

/// Append `image_id` to the orientation's usage list.
pub fn mark_used(record: &mut UsageRecord, image_id: &str, orientation: Orientation) {
    record
        .images
        .for_orientation_mut(orientation)
        .push(image_id.to_string());
}

/// Uniform pick from `pool`; `None` only when the pool is empty.
pub fn pick<R: Rng + ?Sized>(pool: &BTreeSet<String>, rng: &mut R) -> Option<String> {
    pool.iter().choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_available_excludes_used() {
        let all = set(&["a.jpg", "b.jpg", "c.jpg"]);
        let used = set(&["a.jpg"]);
        assert_eq!(available(&all, &used), set(&["b.jpg", "c.jpg"]));
    }

    #[test]
    fn test_available_ignores_used_images_outside_pool() {
        let all = set(&["a.jpg", "b.jpg"]);
        let used = vec!["gone.png".to_string(), "a.jpg".to_string()];
        assert_eq!(available(&all, &used), set(&["b.jpg"]));
    }

    #[test]
    fn test_exhausted_pool_is_offered_again() {
        let all = set(&["a.jpg", "b.jpg", "c.jpg"]);
        let used = set(&["a.jpg", "b.jpg", "c.jpg"]);
        assert_eq!(available(&all, &used), all);

        let superset = set(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
        assert_eq!(available(&all, &superset), all);
    }

    #[test]
    fn test_available_for_each_subset() {
        let all = set(&["1", "2", "3", "4"]);
        let items: Vec<String> = all.iter().cloned().collect();
        // every strict subset leaves a non-empty difference
        for mask in 0u32..(1 << items.len()) - 1 {
            let used: BTreeSet<String> = items
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, s)| s.clone())
                .collect();
            let expected: BTreeSet<String> = all.difference(&used).cloned().collect();
            let got = available(&all, &used);
            assert!(!got.is_empty());
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_orientations_tracked_separately() {
        let mut record = UsageRecord::default();
        mark_used(&mut record, "a.jpg", Orientation::Vertical);

        let all = set(&["a.jpg", "b.jpg"]);
        assert_eq!(available_for(&record, &all, Orientation::Horizontal), all);
        assert_eq!(available_for(&record, &all, Orientation::Vertical), set(&["b.jpg"]));
    }

    #[test]
    fn test_mark_used_appends_duplicates() {
        let mut record = UsageRecord::default();
        mark_used(&mut record, "a.jpg", Orientation::Horizontal);
        mark_used(&mut record, "a.jpg", Orientation::Horizontal);
        assert_eq!(record.images.horizontal, vec!["a.jpg", "a.jpg"]);
        assert!(record.images.vertical.is_empty());
    }

    #[test]
    fn test_pick_stays_in_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = set(&["a.jpg", "b.jpg", "c.jpg"]);
        for _ in 0..20 {
            let picked = pick(&pool, &mut rng).unwrap();
            assert!(pool.contains(&picked));
        }
        assert!(pick(&BTreeSet::new(), &mut rng).is_none());
    }
}
