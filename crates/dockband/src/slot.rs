//! Per-item layout bookkeeping owned by a band.

use crate::item::DockItem;
use dockband_core::geometry::Rect;

/// Layout state of one item inside a band.
#[derive(Debug)]
pub struct Slot {
    pub(crate) item: DockItem,
    /// Desired offset from the previous slot.
    pub(crate) preferred_gap: i32,
    /// Offset applied by the last allocation pass.
    pub(crate) actual_gap: i32,
    /// Natural size along the band axis.
    pub(crate) natural_extent: i32,
    /// max(natural, preferred override) along the band axis.
    pub(crate) min_extent: i32,
    /// Natural size across the band axis.
    pub(crate) cross_extent: i32,
    pub(crate) alloc: Rect<i32>,
    pub(crate) space_before: i32,
    pub(crate) space_after: i32,
}

impl Slot {
    pub(crate) fn new(item: DockItem, preferred_gap: i32) -> Self {
        Self {
            item,
            preferred_gap: preferred_gap.max(0),
            actual_gap: 0,
            natural_extent: 0,
            min_extent: 0,
            cross_extent: 0,
            alloc: Rect::default(),
            space_before: 0,
            space_after: 0,
        }
    }

    pub fn item(&self) -> &DockItem {
        &self.item
    }

    pub fn preferred_gap(&self) -> i32 {
        self.preferred_gap
    }

    pub fn actual_gap(&self) -> i32 {
        self.actual_gap
    }

    pub fn natural_extent(&self) -> i32 {
        self.natural_extent
    }

    pub fn min_extent(&self) -> i32 {
        self.min_extent
    }

    pub fn cross_extent(&self) -> i32 {
        self.cross_extent
    }

    /// Last allocated rectangle.
    pub fn alloc(&self) -> Rect<i32> {
        self.alloc
    }

    /// Slack available before this slot (own gap included).
    pub fn space_before(&self) -> i32 {
        self.space_before
    }

    /// Slack available after this slot (own surplus included).
    pub fn space_after(&self) -> i32 {
        self.space_after
    }

    /// Set both gaps at once; drag placement pins them together.
    pub(crate) fn set_gap(&mut self, gap: i32) {
        let gap = gap.max(0);
        self.preferred_gap = gap;
        self.actual_gap = gap;
    }
}
