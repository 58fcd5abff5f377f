//! Generational arena with stable keys.
//!
//! Records keep their key for as long as they live, regardless of how the
//! ordered views that reference them are spliced. A key whose record was
//! removed never resolves again, even after its storage is reused.

use crate::profiling::profile_function;
use std::num::NonZeroU64;

/// Stable handle into an [`Arena`].
///
/// Packs a 32-bit generation and a 32-bit index; the index is stored off by
/// one so the value is never zero and `Option<ArenaKey>` costs nothing extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArenaKey(NonZeroU64);

impl ArenaKey {
    pub fn new(generation: u32, idx: u32) -> Self {
        let packed = ((generation as u64) << 32) | (idx as u64 + 1);
        Self(NonZeroU64::new(packed).unwrap_or(NonZeroU64::MIN))
    }

    pub fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }

    pub fn index(&self) -> u32 {
        (self.0.get() & u32::MAX as u64) as u32 - 1
    }
}

struct Entry<T> {
    generation: u32,
    data: Option<T>,
}

/// Slot storage addressed by [`ArenaKey`].
pub struct Arena<T> {
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Arena<T> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, data: T) -> ArenaKey {
        profile_function!();
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            let entry = &mut self.entries[idx as usize];
            entry.data = Some(data);
            ArenaKey::new(entry.generation, idx)
        } else {
            let idx = self.entries.len() as u32;
            self.entries.push(Entry {
                generation: 0,
                data: Some(data),
            });
            ArenaKey::new(0, idx)
        }
    }

    pub fn contains(&self, key: ArenaKey) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: ArenaKey) -> Option<&T> {
        self.entries
            .get(key.index() as usize)
            .filter(|entry| entry.generation == key.generation())
            .and_then(|entry| entry.data.as_ref())
    }

    pub fn get_mut(&mut self, key: ArenaKey) -> Option<&mut T> {
        self.entries
            .get_mut(key.index() as usize)
            .filter(|entry| entry.generation == key.generation())
            .and_then(|entry| entry.data.as_mut())
    }

    /// Remove the record behind `key`, retiring the key.
    pub fn remove(&mut self, key: ArenaKey) -> Option<T> {
        profile_function!();
        let index = key.index();
        let entry = self.entries.get_mut(index as usize)?;
        if entry.generation != key.generation() {
            return None;
        }
        let data = entry.data.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        Some(data)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArenaKey, &T)> {
        self.entries.iter().enumerate().filter_map(|(idx, entry)| {
            entry
                .data
                .as_ref()
                .map(|data| (ArenaKey::new(entry.generation, idx as u32), data))
        })
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().filter_map(|entry| entry.data.as_mut())
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_eq_size!(ArenaKey, Option<ArenaKey>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_insert() {
        let mut arena = Arena::<u8>::new();
        let key = arena.insert(15);
        assert_eq!(key.generation(), 0);
        assert_eq!(key.index(), 0);
        assert_eq!(arena.get(key), Some(&15));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_arena_stale_key() {
        let mut arena = Arena::<u8>::new();
        let _ = arena.insert(15);
        // Same index, newer generation than anything issued
        let key = ArenaKey::new(1, 0);
        assert!(arena.get(key).is_none());
        assert!(arena.remove(key).is_none());
    }

    #[test]
    fn test_arena_remove_reuses_index() {
        let mut arena = Arena::<u8>::new();
        let key = arena.insert(15);
        assert_eq!(arena.remove(key), Some(15));
        let new_key = arena.insert(45);
        assert_eq!(key.index(), new_key.index());
        assert_ne!(key.generation(), new_key.generation());
        assert!(arena.get(key).is_none());
        assert_eq!(arena.get(new_key), Some(&45));
    }

    #[test]
    fn test_arena_iter_skips_removed() {
        let mut arena = Arena::<u8>::new();
        let keys: Vec<_> = (0..100).map(|i| arena.insert(i)).collect();
        arena.remove(keys[0]);
        arena.remove(keys[1]);
        let collected: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(collected.len(), 98);
        assert_eq!(collected[0], 2);
        assert_eq!(arena.len(), 98);
    }

    #[test]
    fn test_arena_double_remove() {
        let mut arena = Arena::<u8>::new();
        let key = arena.insert(1);
        assert!(arena.remove(key).is_some());
        assert!(arena.remove(key).is_none());
        assert!(arena.is_empty());
    }
}
