//! Allocation and collection types for dockband.
//!
//! This module provides:
//! - Re-exports of optimized hash collections using AHash
//! - A generational [`Arena`] giving stable keys to records that move around
//!   in ordered sequences

pub mod arena;

pub use arena::{Arena, ArenaKey};

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("band", 3);
        assert_eq!(map.get("band"), Some(&3));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert(7u64);
        assert!(set.contains(&7));
    }
}
