//! Optimized collection types for Trellis.
//!
//! Re-exports of hash collections using AHash. Property tables, the widget
//! registry and draw-list bookkeeping are keyed through these.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("Width", 100.0_f32);
        assert_eq!(map.get("Width"), Some(&100.0));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert(42);
        assert!(set.contains(&42));
    }
}
