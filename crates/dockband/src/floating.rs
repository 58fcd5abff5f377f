//! Undocked items owned by the host.

use dockband_core::geometry::Pos;
use tracing::debug;

use crate::item::DockItem;
use crate::placement::HostLink;
use crate::types::{BandId, ItemId};

/// An item torn off every band, parked at a pointer position.
#[derive(Debug)]
pub struct FloatingItem {
    pub(crate) item: DockItem,
    pub(crate) position: Pos<i32>,
}

impl FloatingItem {
    pub fn item(&self) -> &DockItem {
        &self.item
    }

    pub fn position(&self) -> Pos<i32> {
        self.position
    }
}

/// Host-owned list of undocked items, in undock order.
#[derive(Debug, Default)]
pub struct FloatingPool {
    items: Vec<FloatingItem>,
}

impl FloatingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.get(item).is_some()
    }

    pub fn get(&self, item: ItemId) -> Option<&FloatingItem> {
        self.items.iter().find(|f| f.item.id() == item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloatingItem> {
        self.items.iter()
    }

    pub(crate) fn item_mut(&mut self, item: ItemId) -> Option<&mut DockItem> {
        self.items
            .iter_mut()
            .find(|f| f.item.id() == item)
            .map(|f| &mut f.item)
    }

    pub(crate) fn insert(&mut self, mut item: DockItem, position: Pos<i32>) -> ItemId {
        let id = item.id();
        item.set_floating(true);
        self.items.push(FloatingItem { item, position });
        id
    }

    pub(crate) fn take(&mut self, item: ItemId) -> Option<FloatingItem> {
        let index = self.items.iter().position(|f| f.item.id() == item)?;
        Some(self.items.remove(index))
    }

    /// Move a parked item. Returns false if it is not in the pool.
    pub(crate) fn move_to(&mut self, item: ItemId, position: Pos<i32>) -> bool {
        match self.items.iter_mut().find(|f| f.item.id() == item) {
            Some(floating) => {
                floating.position = position;
                true
            }
            None => false,
        }
    }
}

impl HostLink for FloatingPool {
    fn peek(&self, item: ItemId) -> Option<&DockItem> {
        self.get(item).map(|f| &f.item)
    }

    fn reparent(&mut self, item: ItemId, target: BandId, pointer: Pos<i32>) -> Option<DockItem> {
        let floating = self.take(item)?;
        debug!(item = %item, to = %target, x = pointer.x, y = pointer.y, "redocking floating item");
        Some(floating.item)
    }
}
