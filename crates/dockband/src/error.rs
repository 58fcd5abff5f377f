//! Error types for dock operations.

use crate::item::DockItem;
use crate::types::{BandId, ItemId};
use dockband_core::geometry::Orientation;

/// Error types for dock operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockError {
    /// Item is not a member of the band or host.
    ItemNotFound(ItemId),
    /// Band is not owned by the host.
    BandNotFound(BandId),
    /// Docking would break the exclusive-item rule.
    ExclusiveConflict,
    /// The item refuses the orientation of the target band.
    OrientationForbidden(Orientation),
    /// The item may not be undocked.
    FloatingForbidden,
    /// The item is locked in place.
    ItemLocked(ItemId),
    /// No drag session is active.
    NotDragging,
    /// The drag session belongs to a different item.
    ItemMismatch { expected: ItemId, found: ItemId },
    /// Bands cannot be created with the floating placement.
    InvalidPlacement,
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DockError::ItemNotFound(id) => write!(f, "Item {} not found", id),
            DockError::BandNotFound(id) => write!(f, "Band {} not found", id),
            DockError::ExclusiveConflict => write!(f, "Band is reserved for an exclusive item"),
            DockError::OrientationForbidden(o) => write!(f, "Item refuses {:?} orientation", o),
            DockError::FloatingForbidden => write!(f, "Item cannot float"),
            DockError::ItemLocked(id) => write!(f, "Item {} is locked", id),
            DockError::NotDragging => write!(f, "No drag in progress"),
            DockError::ItemMismatch { expected, found } => {
                write!(f, "Drag belongs to {}, not {}", expected, found)
            }
            DockError::InvalidPlacement => write!(f, "Bands cannot be floating"),
        }
    }
}

impl std::error::Error for DockError {}

/// Result type for dock operations.
pub type DockResult<T> = Result<T, DockError>;

/// A refused insertion, handing the item back to the caller.
#[derive(Debug)]
pub struct InsertError {
    /// The item that was not inserted.
    pub item: DockItem,
    /// Why it was refused.
    pub reason: DockError,
}

impl InsertError {
    pub(crate) fn new(item: DockItem, reason: DockError) -> Self {
        Self { item, reason }
    }

    /// Take the item back.
    pub fn into_item(self) -> DockItem {
        self.item
    }
}

impl std::fmt::Display for InsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cannot insert '{}': {}", self.item.name(), self.reason)
    }
}

impl std::error::Error for InsertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}
