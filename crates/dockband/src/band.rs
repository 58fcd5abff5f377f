//! Ordered container of slots along one axis.

use std::sync::Arc;

use dockband_core::alloc::Arena;
use dockband_core::geometry::{Orientation, Rect};
use tracing::{debug, trace};

use crate::drag::BandSnapshot;
use crate::error::{DockError, DockResult, InsertError};
use crate::item::DockItem;
use crate::slot::Slot;
use crate::types::{BandId, ItemBehavior, ItemId, SlotId};

/// A row (or column) of dock items.
///
/// Slots live in an arena and are addressed by stable [`SlotId`]s; `order`
/// is the display order. At most one slot is floating (being dragged), and
/// that slot stays a member of `order` while it floats.
pub struct Band {
    pub(crate) id: BandId,
    pub(crate) orientation: Orientation,
    pub(crate) slots: Arena<Slot>,
    pub(crate) order: Vec<SlotId>,
    pub(crate) floating: Option<SlotId>,
    pub(crate) allocation: Rect<i32>,
    pub(crate) min_total: i32,
    pub(crate) gap_total: i32,
    pub(crate) natural_total: i32,
    pub(crate) cross_extent: i32,
    /// Snapshot of the drag in progress, if any.
    pub(crate) drag: Option<Arc<BandSnapshot>>,
    dirty: bool,
}

impl Band {
    /// Create an empty band.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            id: BandId::next(),
            orientation,
            slots: Arena::new(),
            order: Vec::new(),
            floating: None,
            allocation: Rect::default(),
            min_total: 0,
            gap_total: 0,
            natural_total: 0,
            cross_extent: 0,
            drag: None,
            dirty: true,
        }
    }

    pub fn id(&self) -> BandId {
        self.id
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change the band axis, turning every member that allows it.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        for slot in self.slots.values_mut() {
            if !slot.item.coerce_orientation(orientation) {
                debug!(item = %slot.item.id(), ?orientation, "item keeps its orientation");
            }
        }
        self.measure();
        self.request_relayout();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Last rectangle handed to [`Band::allocate`].
    pub fn allocation(&self) -> Rect<i32> {
        self.allocation
    }

    /// Sum of member minimum extents.
    pub fn min_total(&self) -> i32 {
        self.min_total
    }

    /// Sum of member preferred gaps.
    pub fn gap_total(&self) -> i32 {
        self.gap_total
    }

    /// Sum of member natural extents.
    pub fn natural_total(&self) -> i32 {
        self.natural_total
    }

    /// Largest member size across the axis.
    pub fn cross_extent(&self) -> i32 {
        self.cross_extent
    }

    /// The slot being dragged, if any.
    pub fn floating_slot(&self) -> Option<SlotId> {
        self.floating
    }

    /// The item being dragged, if it currently sits in this band.
    pub fn floating_item(&self) -> Option<ItemId> {
        self.floating
            .and_then(|id| self.slot(id))
            .map(|slot| slot.item.id())
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether the band asked its host for a new measure/allocate pass.
    pub fn needs_relayout(&self) -> bool {
        self.dirty
    }

    pub(crate) fn request_relayout(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_relayout(&mut self) {
        self.dirty = false;
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.0)
    }

    pub(crate) fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        self.slots.get_mut(id.0)
    }

    /// Slots in display order.
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &Slot)> {
        self.order
            .iter()
            .filter_map(|id| self.slots.get(id.0).map(|slot| (*id, slot)))
    }

    /// Items in display order.
    pub fn items(&self) -> impl Iterator<Item = &DockItem> {
        self.slots().map(|(_, slot)| &slot.item)
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.slot_of(item).is_some()
    }

    pub fn slot_of(&self, item: ItemId) -> Option<SlotId> {
        self.slots()
            .find(|(_, slot)| slot.item.id() == item)
            .map(|(id, _)| id)
    }

    pub fn index_of(&self, item: ItemId) -> Option<usize> {
        self.slots().position(|(_, slot)| slot.item.id() == item)
    }

    pub(crate) fn position(&self, slot: SlotId) -> Option<usize> {
        self.order.iter().position(|id| *id == slot)
    }

    pub fn item(&self, item: ItemId) -> Option<&DockItem> {
        self.slots()
            .map(|(_, slot)| &slot.item)
            .find(|it| it.id() == item)
    }

    pub fn item_mut(&mut self, item: ItemId) -> Option<&mut DockItem> {
        self.slots
            .values_mut()
            .map(|slot| &mut slot.item)
            .find(|it| it.id() == item)
    }

    /// Check the exclusive-item rule for docking `item` here.
    ///
    /// Members other than `item` itself are considered, so an item may always
    /// move within a band it already occupies alone.
    pub fn docking_allowed(&self, item: ItemId, behavior: ItemBehavior) -> DockResult<()> {
        let mut others = self.items().filter(|it| it.id() != item).peekable();
        if others.peek().is_none() {
            return Ok(());
        }
        if behavior.contains(ItemBehavior::EXCLUSIVE) {
            return Err(DockError::ExclusiveConflict);
        }
        if others.any(|it| it.is_exclusive()) {
            return Err(DockError::ExclusiveConflict);
        }
        Ok(())
    }

    /// Insert `item` at `position` with `gap` pixels before it.
    ///
    /// A negative or out-of-range position appends. The item is refused (and
    /// handed back) if it would break the exclusive rule or cannot take the
    /// band's orientation.
    pub fn insert(&mut self, mut item: DockItem, gap: i32, position: i32) -> Result<ItemId, InsertError> {
        if let Err(reason) = self.docking_allowed(item.id(), item.behavior()) {
            debug!(band = %self.id, item = %item.id(), "insert refused: {}", reason);
            return Err(InsertError::new(item, reason));
        }
        if !item.coerce_orientation(self.orientation) {
            let reason = DockError::OrientationForbidden(self.orientation);
            debug!(band = %self.id, item = %item.id(), "insert refused: {}", reason);
            return Err(InsertError::new(item, reason));
        }

        let index = usize::try_from(position)
            .ok()
            .filter(|index| *index <= self.order.len())
            .unwrap_or(self.order.len());
        let id = item.id();
        let slot = SlotId(self.slots.insert(Slot::new(item, gap)));
        self.order.insert(index, slot);
        trace!(band = %self.id, item = %id, index, gap, "inserted");

        self.measure();
        self.request_relayout();
        self.debug_check_invariants();
        Ok(id)
    }

    /// Insert as the first item.
    pub fn prepend(&mut self, item: DockItem, gap: i32) -> Result<ItemId, InsertError> {
        self.insert(item, gap, 0)
    }

    /// Insert as the last item.
    pub fn append(&mut self, item: DockItem, gap: i32) -> Result<ItemId, InsertError> {
        self.insert(item, gap, -1)
    }

    /// Remove `item`, handing it back.
    ///
    /// While a drag is in progress the remaining slots fall back to their
    /// snapshot gaps so the drag keeps a consistent picture of the band.
    pub fn remove(&mut self, item: ItemId) -> Option<DockItem> {
        let Some(slot_id) = self.slot_of(item) else {
            debug!(band = %self.id, item = %item, "remove: not a member");
            return None;
        };
        if self.floating == Some(slot_id) {
            self.floating = None;
        }
        self.order.retain(|id| *id != slot_id);
        let mut slot = self.slots.remove(slot_id.0)?;
        slot.item.set_dragging(false);

        if let Some(snapshot) = self.drag.clone() {
            for id in &self.order {
                if let (Some(live), Some(snap)) = (self.slots.get_mut(id.0), snapshot.slot(*id)) {
                    live.set_gap(snap.gap);
                }
            }
        }

        trace!(band = %self.id, item = %item, "removed");
        self.measure();
        self.request_relayout();
        self.debug_check_invariants();
        Some(slot.item)
    }

    /// Move `item` to `new_index` (clamped). Returns false if absent.
    pub fn reorder(&mut self, item: ItemId, new_index: usize) -> bool {
        let Some(index) = self.index_of(item) else {
            return false;
        };
        let slot = self.order.remove(index);
        let dest = new_index.min(self.order.len());
        self.order.insert(dest, slot);
        trace!(band = %self.id, item = %item, from = index, to = dest, "reordered");
        self.request_relayout();
        true
    }

    /// Find a member by name, with its position and preferred gap.
    pub fn get_item_by_name(&self, name: &str) -> Option<(&DockItem, usize, i32)> {
        self.slots()
            .enumerate()
            .find(|(_, (_, slot))| slot.item.name() == name)
            .map(|(position, (_, slot))| (&slot.item, position, slot.preferred_gap))
    }

    /// Set the preferred gap before `item`.
    pub fn set_child_offset(&mut self, item: ItemId, gap: i32) -> bool {
        let Some(slot_id) = self.slot_of(item) else {
            return false;
        };
        if let Some(slot) = self.slot_mut(slot_id) {
            slot.preferred_gap = gap.max(0);
        }
        self.measure();
        self.request_relayout();
        true
    }

    /// Preferred gap before `item`.
    pub fn child_offset(&self, item: ItemId) -> Option<i32> {
        self.slot_of(item)
            .and_then(|id| self.slot(id))
            .map(|slot| slot.preferred_gap)
    }

    /// Ordered `(name, position, gap)` triples for layout persistence.
    pub fn layout_entries(&self) -> impl Iterator<Item = (&str, usize, i32)> {
        self.slots()
            .enumerate()
            .map(|(position, (_, slot))| (slot.item.name(), position, slot.preferred_gap))
    }

    /// Slot after `slot` in display order, skipping the floating and hidden ones.
    pub(crate) fn next_solid(&self, slot: SlotId) -> Option<SlotId> {
        let index = self.position(slot)?;
        self.order[index + 1..]
            .iter()
            .copied()
            .find(|id| self.is_solid(*id))
    }

    /// Slot before `slot` in display order, skipping the floating and hidden ones.
    pub(crate) fn prev_solid(&self, slot: SlotId) -> Option<SlotId> {
        let index = self.position(slot)?;
        self.order[..index]
            .iter()
            .rev()
            .copied()
            .find(|id| self.is_solid(*id))
    }

    pub(crate) fn first_solid(&self) -> Option<SlotId> {
        self.order.iter().copied().find(|id| self.is_solid(*id))
    }

    pub(crate) fn is_solid(&self, slot: SlotId) -> bool {
        Some(slot) != self.floating && self.is_visible_slot(slot)
    }

    pub(crate) fn is_visible_slot(&self, slot: SlotId) -> bool {
        self.slot(slot).is_some_and(|s| s.item.is_visible())
    }

    /// Move `slot` directly after `anchor`, or to the front when `anchor` is None.
    pub(crate) fn move_after(&mut self, slot: SlotId, anchor: Option<SlotId>) {
        self.order.retain(|id| *id != slot);
        let index = anchor
            .and_then(|anchor| self.position(anchor))
            .map_or(0, |index| index + 1);
        self.order.insert(index, slot);
    }

    #[inline]
    pub(crate) fn debug_check_invariants(&self) {
        debug_assert_eq!(self.order.len(), self.slots.len(), "order and arena disagree");
        debug_assert!(
            self.floating.is_none_or(|id| self.order.contains(&id)),
            "floating slot must stay a member of the band"
        );
        debug_assert!(
            self.order.len() <= 1 || !self.items().any(|it| it.is_exclusive()),
            "exclusive item must be alone in its band"
        );
    }
}

impl std::fmt::Debug for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Band")
            .field("id", &self.id)
            .field("orientation", &self.orientation)
            .field("items", &self.items().map(|it| it.name()).collect::<Vec<_>>())
            .field("floating", &self.floating)
            .field("allocation", &self.allocation)
            .finish()
    }
}
