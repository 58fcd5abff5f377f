//! Shared identifiers and flags for the docking engine.

use bitflags::bitflags;
use dockband_core::alloc::ArenaKey;
use dockband_core::geometry::Orientation;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_BAND_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a dock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Process-unique identifier of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BandId(u64);

impl BandId {
    pub(crate) fn next() -> Self {
        Self(NEXT_BAND_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "band#{}", self.0)
    }
}

/// Stable key of a slot inside its band.
///
/// Keys survive reordering; a key is retired when its slot leaves the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(pub(crate) ArenaKey);

bitflags! {
    /// Behaviour flags declared by a dock item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemBehavior: u8 {
        /// No restrictions.
        const NORMAL = 0;
        /// The item must be the only occupant of its band.
        const EXCLUSIVE = 1 << 0;
        /// The item may not be torn off into a floating window.
        const NEVER_FLOATING = 1 << 1;
        /// The item may not take the vertical orientation.
        const NEVER_VERTICAL = 1 << 2;
        /// The item may not take the horizontal orientation.
        const NEVER_HORIZONTAL = 1 << 3;
        /// The item cannot be dragged.
        const LOCKED = 1 << 4;
    }
}

impl ItemBehavior {
    /// Check whether an item with these flags may take `orientation`.
    pub fn allows(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => !self.contains(ItemBehavior::NEVER_HORIZONTAL),
            Orientation::Vertical => !self.contains(ItemBehavior::NEVER_VERTICAL),
        }
    }
}

/// Where a band (or an undocked item) sits relative to the client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Top,
    Bottom,
    Left,
    Right,
    /// Undocked, held by the host's floating pool.
    Floating,
}

impl Placement {
    /// Axis of bands at this placement; `None` for floating items.
    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            Placement::Top | Placement::Bottom => Some(Orientation::Horizontal),
            Placement::Left | Placement::Right => Some(Orientation::Vertical),
            Placement::Floating => None,
        }
    }

    /// Check if band index 0 of this placement hugs the leading window edge.
    ///
    /// Top and left stacks grow away from the origin; bottom and right stacks
    /// grow back toward it.
    pub fn grows_forward(&self) -> bool {
        matches!(self, Placement::Top | Placement::Left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ItemId::next();
        let b = ItemId::next();
        assert_ne!(a, b);
        assert_ne!(BandId::next(), BandId::next());
    }

    #[test]
    fn test_behavior_orientation_rules() {
        let flags = ItemBehavior::NEVER_VERTICAL;
        assert!(flags.allows(Orientation::Horizontal));
        assert!(!flags.allows(Orientation::Vertical));
        assert!(ItemBehavior::NORMAL.allows(Orientation::Vertical));
    }

    #[test]
    fn test_placement_orientation() {
        assert_eq!(Placement::Top.orientation(), Some(Orientation::Horizontal));
        assert_eq!(Placement::Right.orientation(), Some(Orientation::Vertical));
        assert_eq!(Placement::Floating.orientation(), None);
        assert!(Placement::Left.grows_forward());
        assert!(!Placement::Bottom.grows_forward());
    }
}
