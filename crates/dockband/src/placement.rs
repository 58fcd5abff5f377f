//! Placing a dragged item into a band.
//!
//! A move resets the band to its snapshot picture, then asks one of three
//! strategies to fit the floating slot at the pointer:
//!
//! - over an existing slot: pull that slot back and push its followers
//!   forward until the dragged item fits right after it;
//! - over free space between slots: eat into the following gaps;
//! - past the last slot: trim against the trailing space and pull earlier
//!   slots back for whatever does not fit.
//!
//! Slots never move past the pointer on their own; only gaps shrink.

use dockband_core::geometry::{Pos, Rect};
use dockband_core::profiling::profile_function;
use tracing::{debug, trace};

use crate::band::Band;
use crate::drag::{BandSnapshot, SlotSnapshot};
use crate::hit::Hit;
use crate::item::DockItem;
use crate::slot::Slot;
use crate::types::{BandId, ItemId, SlotId};

/// Reverse interface a band uses to reach items it does not own.
///
/// The host passes itself (or one of its parts) into every move so the band
/// can pull the dragged item out of another band or the floating pool.
pub trait HostLink {
    /// Look at an item owned elsewhere.
    fn peek(&self, item: ItemId) -> Option<&DockItem>;

    /// Hand `item` over to `target`, removing it from its current owner.
    fn reparent(&mut self, item: ItemId, target: BandId, pointer: Pos<i32>) -> Option<DockItem>;
}

/// Link for a band used on its own: nothing lives outside it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl HostLink for Detached {
    fn peek(&self, _item: ItemId) -> Option<&DockItem> {
        None
    }

    fn reparent(&mut self, _item: ItemId, _target: BandId, _pointer: Pos<i32>) -> Option<DockItem> {
        None
    }
}

impl HostLink for Band {
    fn peek(&self, item: ItemId) -> Option<&DockItem> {
        self.item(item)
    }

    fn reparent(&mut self, item: ItemId, target: BandId, _pointer: Pos<i32>) -> Option<DockItem> {
        debug!(from = %self.id, to = %target, item = %item, "reparenting");
        self.remove(item)
    }
}

/// What the band learned about the dragged item before touching anything.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    extent: i32,
}

impl Band {
    /// Fit `item` at `pointer`, reparenting it through `link` if needed.
    ///
    /// Returns false, leaving order and gaps untouched, if the item does not
    /// fit or may not dock here.
    pub(crate) fn drag_to(
        &mut self,
        snapshot: &BandSnapshot,
        link: &mut dyn HostLink,
        item: ItemId,
        pointer: Pos<i32>,
    ) -> bool {
        profile_function!();
        let axis = self.orientation;
        let pointer = self.clamp_to_allocation(pointer);
        let coord = pointer.main(axis);
        let hit = self.hit_test(Some(snapshot), coord);

        let saved = self.save_gaps();
        self.reset_to_snapshot(snapshot);

        let docked = match hit {
            Hit::Occupied(slot) => self.dock_occupied(snapshot, link, item, slot, coord, pointer),
            Hit::Empty { after } => self.dock_empty(snapshot, link, item, after, coord, pointer),
        };

        if docked {
            self.measure();
            self.request_relayout();
            self.debug_check_invariants();
        } else {
            self.restore_gaps(saved);
        }
        trace!(band = %self.id, item = %item, coord, ?hit, docked, "drag move");
        docked
    }

    fn clamp_to_allocation(&self, pointer: Pos<i32>) -> Pos<i32> {
        let rect = self.allocation;
        let axis = self.orientation;
        let start = rect.start(axis);
        let last = (rect.end(axis) - 1).max(start);
        let coord = pointer.main(axis).clamp(start, last);
        if axis.is_horizontal() {
            Pos::new(coord, pointer.y)
        } else {
            Pos::new(pointer.x, coord)
        }
    }

    fn save_gaps(&self) -> Vec<(SlotId, i32, i32)> {
        self.slots()
            .map(|(id, slot)| (id, slot.preferred_gap, slot.actual_gap))
            .collect()
    }

    fn restore_gaps(&mut self, saved: Vec<(SlotId, i32, i32)>) {
        for (id, preferred, actual) in saved {
            if let Some(slot) = self.slot_mut(id) {
                slot.preferred_gap = preferred;
                slot.actual_gap = actual;
            }
        }
    }

    fn reset_to_snapshot(&mut self, snapshot: &BandSnapshot) {
        let floating = self.floating;
        for id in &self.order {
            if Some(*id) == floating {
                continue;
            }
            if let (Some(slot), Some(snap)) = (self.slots.get_mut(id.0), snapshot.slot(*id)) {
                slot.set_gap(snap.gap);
            }
        }
    }

    /// Snapshot geometry of `id`, falling back to the live slot.
    fn snap(&self, snapshot: &BandSnapshot, id: SlotId) -> SlotSnapshot {
        snapshot.slot(id).copied().unwrap_or_else(|| {
            self.slot(id).map_or(
                SlotSnapshot {
                    alloc: Rect::default(),
                    gap: 0,
                    space_before: 0,
                    space_after: 0,
                },
                |slot| SlotSnapshot {
                    alloc: slot.alloc,
                    gap: slot.actual_gap,
                    space_before: slot.space_before,
                    space_after: slot.space_after,
                },
            )
        })
    }

    fn candidate(&self, link: &dyn HostLink, item: ItemId) -> Option<Candidate> {
        let Some(dock_item) = self.item(item).or_else(|| link.peek(item)) else {
            debug!(band = %self.id, item = %item, "dragged item is nowhere to be found");
            return None;
        };
        if let Err(reason) = self.docking_allowed(item, dock_item.behavior()) {
            trace!(band = %self.id, item = %item, "refused: {}", reason);
            return None;
        }
        if !dock_item.behavior().allows(self.orientation) {
            trace!(band = %self.id, item = %item, "refused: orientation");
            return None;
        }
        let extent = dock_item
            .size_request_in(self.orientation)
            .main(self.orientation)
            .max(0);
        Some(Candidate { extent })
    }

    /// Make `item` this band's floating slot, adopting it if it lives elsewhere.
    fn attach(&mut self, link: &mut dyn HostLink, item: ItemId, pointer: Pos<i32>) -> Option<SlotId> {
        let orientation = self.orientation;
        if let Some(id) = self.slot_of(item) {
            let slot = self.slot_mut(id)?;
            slot.item.coerce_orientation(orientation);
            slot.item.set_floating(true);
            slot.item.set_dragging(true);
            self.floating = Some(id);
            return Some(id);
        }

        let mut adopted = link.reparent(item, self.id, pointer)?;
        adopted.coerce_orientation(orientation);
        adopted.set_floating(true);
        adopted.set_dragging(true);
        let id = SlotId(self.slots.insert(Slot::new(adopted, 0)));
        self.order.insert(0, id);
        self.floating = Some(id);
        debug!(band = %self.id, item = %item, "adopted dragged item");
        Some(id)
    }

    fn set_slot_gap(&mut self, id: SlotId, gap: i32) {
        if let Some(slot) = self.slot_mut(id) {
            slot.set_gap(gap);
        }
    }

    fn dock_occupied(
        &mut self,
        snapshot: &BandSnapshot,
        link: &mut dyn HostLink,
        item: ItemId,
        hit: SlotId,
        coord: i32,
        pointer: Pos<i32>,
    ) -> bool {
        let Some(candidate) = self.candidate(link, item) else {
            return false;
        };
        let target = self.snap(snapshot, hit);
        if target.space_before + target.space_after < candidate.extent {
            trace!(band = %self.id, item = %item, "no room around occupied slot");
            return false;
        }
        let Some(floating) = self.attach(link, item, pointer) else {
            return false;
        };

        let amount = target.alloc.end(self.orientation) - coord;
        let moved = self.attempt_move_backward(snapshot, hit, amount);
        if candidate.extent >= moved {
            if let Some(next) = self.next_solid(hit) {
                self.attempt_move_forward(snapshot, next, candidate.extent - moved);
            }
        }

        self.set_slot_gap(floating, 0);
        self.move_after(floating, Some(hit));
        true
    }

    fn dock_empty(
        &mut self,
        snapshot: &BandSnapshot,
        link: &mut dyn HostLink,
        item: ItemId,
        after: Option<SlotId>,
        coord: i32,
        pointer: Pos<i32>,
    ) -> bool {
        let Some(candidate) = self.candidate(link, item) else {
            return false;
        };
        let axis = self.orientation;

        let (c1, c2) = match after {
            Some(anchor) => match self.next_solid(anchor) {
                Some(next) => (Some(anchor), next),
                None => {
                    return self.dock_empty_end(snapshot, link, item, candidate, anchor, coord, pointer);
                }
            },
            None => match self.first_solid() {
                Some(first) => (None, first),
                None => {
                    let Some(floating) = self.attach(link, item, pointer) else {
                        return false;
                    };
                    let origin = snapshot.allocation().start(axis);
                    self.set_slot_gap(floating, (coord - origin).max(0));
                    self.move_after(floating, None);
                    return true;
                }
            },
        };

        let next = self.snap(snapshot, c2);
        let available = match c1 {
            Some(c1) => self.snap(snapshot, c1).space_after,
            None => {
                let surplus = next.alloc.extent(axis) - self.slot(c2).map_or(0, |slot| slot.natural_extent);
                next.gap + next.space_after + surplus
            }
        };
        if available < candidate.extent {
            trace!(band = %self.id, item = %item, available, "no room in free space");
            return false;
        }
        let Some(floating) = self.attach(link, item, pointer) else {
            return false;
        };

        let origin = match c1 {
            Some(c1) => self.snap(snapshot, c1).alloc.end(axis),
            None => snapshot.allocation().start(axis),
        };
        let mut new_offset = coord - origin;
        let needed = new_offset + candidate.extent;

        if next.gap >= needed {
            self.set_slot_gap(c2, next.gap - needed);
        } else {
            let mut requirement = needed;
            let mut cursor = Some(c2);
            while let Some(id) = cursor {
                if requirement <= 0 {
                    break;
                }
                let snap = self.snap(snapshot, id);
                if snap.gap > requirement {
                    self.set_slot_gap(id, snap.gap - requirement);
                    requirement = 0;
                } else {
                    requirement -= snap.gap;
                    self.set_slot_gap(id, 0);
                }
                cursor = self.next_solid(id);
                if cursor.is_none() {
                    requirement -= requirement.min(snap.space_after);
                }
            }
            if requirement > 0 {
                new_offset -= requirement;
            }
        }

        self.set_slot_gap(floating, new_offset.max(0));
        self.move_after(floating, c1);
        true
    }

    #[allow(clippy::too_many_arguments)]
    fn dock_empty_end(
        &mut self,
        snapshot: &BandSnapshot,
        link: &mut dyn HostLink,
        item: ItemId,
        candidate: Candidate,
        anchor: SlotId,
        coord: i32,
        pointer: Pos<i32>,
    ) -> bool {
        let last = self.snap(snapshot, anchor);
        if last.space_before + last.space_after < candidate.extent {
            trace!(band = %self.id, item = %item, "no room at band end");
            return false;
        }
        let Some(floating) = self.attach(link, item, pointer) else {
            return false;
        };

        let mut new_offset = coord - last.alloc.end(self.orientation);
        if new_offset + candidate.extent > last.space_after {
            let excess = new_offset + candidate.extent - last.space_after;
            if excess < new_offset {
                new_offset -= excess;
            } else {
                self.attempt_move_backward(snapshot, anchor, excess - new_offset);
                new_offset = 0;
            }
        }

        self.set_slot_gap(floating, new_offset.max(0));
        self.move_after(floating, Some(anchor));
        true
    }

    /// Shrink the gaps of `from` and the slots before it by up to `amount`.
    ///
    /// Returns how far `from` actually moved toward the band origin.
    pub(crate) fn attempt_move_backward(&mut self, snapshot: &BandSnapshot, from: SlotId, amount: i32) -> i32 {
        let start = if self.is_solid(from) {
            Some(from)
        } else {
            self.prev_solid(from)
        };
        self.shrink_gaps(snapshot, start, amount, Band::prev_solid)
    }

    /// Shrink the gaps of `from` and the slots after it by up to `amount`.
    ///
    /// Returns how much room was made in front of `from`.
    pub(crate) fn attempt_move_forward(&mut self, snapshot: &BandSnapshot, from: SlotId, amount: i32) -> i32 {
        let start = if self.is_solid(from) {
            Some(from)
        } else {
            self.next_solid(from)
        };
        self.shrink_gaps(snapshot, start, amount, Band::next_solid)
    }

    fn shrink_gaps(
        &mut self,
        snapshot: &BandSnapshot,
        start: Option<SlotId>,
        mut amount: i32,
        step: fn(&Band, SlotId) -> Option<SlotId>,
    ) -> i32 {
        let mut moved = 0;
        let mut cursor = start;
        while let Some(id) = cursor {
            if amount <= 0 {
                break;
            }
            let gap = self.snap(snapshot, id).gap;
            if gap > amount {
                self.set_slot_gap(id, gap - amount);
                moved += amount;
                amount = 0;
            } else {
                self.set_slot_gap(id, 0);
                moved += gap;
                amount -= gap;
            }
            cursor = step(self, id);
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::DockItem;
    use crate::test_support::{Block, allocated_band};
    use crate::types::ItemBehavior;

    fn layout(band: &Band) -> Vec<(&str, i32)> {
        band.slots()
            .map(|(_, slot)| (slot.item().name(), slot.preferred_gap()))
            .collect()
    }

    fn relayout(band: &mut Band) -> Vec<(&str, i32)> {
        band.allocate(band.allocation());
        band.slots()
            .map(|(_, slot)| (slot.item().name(), slot.alloc().x))
            .collect()
    }

    #[test]
    fn test_drag_over_occupied_slot() {
        // A at 0..50, B at 60..110, C at 120..170
        let (mut band, ids) = allocated_band(&[50, 50, 50], &[0, 10, 10], 300);
        let mut session = band.drag_begin(ids[1]).unwrap();

        assert!(band.drag_move(&mut session, 140, 10));
        assert_eq!(layout(&band), [("item0", 0), ("item2", 40), ("item1", 0)]);
        assert_eq!(relayout(&mut band), [("item0", 0), ("item2", 90), ("item1", 140)]);
    }

    #[test]
    fn test_drag_into_free_space_between_slots() {
        let (mut band, ids) = allocated_band(&[50, 50, 50], &[0, 10, 10], 300);
        let mut session = band.drag_begin(ids[2]).unwrap();

        // Between A (ends at 50) and B (starts at 60)
        assert!(band.drag_move(&mut session, 52, 10));
        assert_eq!(layout(&band), [("item0", 0), ("item2", 2), ("item1", 0)]);
        assert_eq!(relayout(&mut band), [("item0", 0), ("item2", 52), ("item1", 102)]);
    }

    #[test]
    fn test_drag_to_band_start() {
        let (mut band, ids) = allocated_band(&[50, 50], &[20, 10], 300);
        let mut session = band.drag_begin(ids[1]).unwrap();

        // A sits at 20..70; dropping at 5 pushes it right
        assert!(band.drag_move(&mut session, 5, 10));
        assert_eq!(layout(&band), [("item1", 5), ("item0", 0)]);
        assert_eq!(relayout(&mut band), [("item1", 5), ("item0", 55)]);
    }

    #[test]
    fn test_drag_past_last_slot() {
        let (mut band, ids) = allocated_band(&[50, 50, 50], &[0, 10, 10], 300);
        let mut session = band.drag_begin(ids[0]).unwrap();

        assert!(band.drag_move(&mut session, 200, 10));
        // B inherits A's extent as its gap
        assert_eq!(layout(&band), [("item1", 60), ("item2", 10), ("item0", 30)]);
        assert_eq!(relayout(&mut band), [("item1", 60), ("item2", 120), ("item0", 200)]);
    }

    #[test]
    fn test_drag_past_end_trims_against_trailing_space() {
        let (mut band, ids) = allocated_band(&[50, 50, 50], &[0, 10, 10], 300);
        let mut session = band.drag_begin(ids[0]).unwrap();

        // Pointer clamps to 299; the item cannot hang off the band
        assert!(band.drag_move(&mut session, 500, 10));
        relayout(&mut band);
        let (_, slot) = band.slots().last().unwrap();
        assert_eq!(slot.item().name(), "item0");
        assert!(slot.alloc().end(band.orientation()) <= 300);
    }

    #[test]
    fn test_pointer_wiggle_reproduces_layout() {
        let (mut band, ids) = allocated_band(&[50, 50, 50], &[0, 10, 10], 300);
        let mut session = band.drag_begin(ids[1]).unwrap();
        assert!(band.drag_move(&mut session, 140, 10));
        let first = layout(&band).into_iter().map(|(n, g)| (n.to_owned(), g)).collect::<Vec<_>>();

        assert!(band.drag_move(&mut session, 20, 10));
        assert!(band.drag_move(&mut session, 140, 10));
        let again = layout(&band).into_iter().map(|(n, g)| (n.to_owned(), g)).collect::<Vec<_>>();
        assert_eq!(first, again);
    }

    #[test]
    fn test_refused_move_leaves_band_untouched() {
        // Target band is full: no slack anywhere
        let (mut target, _) = allocated_band(&[50, 50], &[0, 0], 100);
        let (mut source, ids) = allocated_band(&[60], &[0], 300);
        let snapshot = target.take_snapshot(ids[0]);
        let before = layout(&target).into_iter().map(|(n, g)| (n.to_owned(), g)).collect::<Vec<_>>();

        assert!(!target.drag_to(&snapshot, &mut source, ids[0], Pos::new(25, 10)));
        let after = layout(&target).into_iter().map(|(n, g)| (n.to_owned(), g)).collect::<Vec<_>>();
        assert_eq!(before, after);
        assert!(source.contains(ids[0]));
        assert_eq!(target.floating_slot(), None);
    }

    #[test]
    fn test_missing_item_is_refused() {
        let (mut band, ids) = allocated_band(&[50, 50], &[0, 10], 300);
        let mut session = band.drag_begin(ids[1]).unwrap();
        band.remove(ids[1]);
        let gaps: Vec<_> = band.slots().map(|(_, slot)| slot.preferred_gap()).collect();

        assert!(!band.drag_move(&mut session, 25, 10));
        assert_eq!(band.slots().map(|(_, slot)| slot.preferred_gap()).collect::<Vec<_>>(), gaps);
        assert_eq!(band.len(), 1);
    }

    #[test]
    fn test_forbidden_orientation_is_refused() {
        let mut target = Band::new(dockband_core::geometry::Orientation::Vertical);
        target.allocate(Rect::new(0, 0, 20, 300));
        let mut source = Band::new(dockband_core::geometry::Orientation::Horizontal);
        let menu = DockItem::new("menu", Block::new(100, 20)).with_behavior(ItemBehavior::NEVER_VERTICAL);
        let id = source.append(menu, 0).unwrap();
        let snapshot = target.take_snapshot(id);

        assert!(!target.drag_to(&snapshot, &mut source, id, Pos::new(10, 40)));
        assert!(source.contains(id));
        assert!(target.is_empty());
    }

    #[test]
    fn test_exclusive_alone_may_move() {
        let mut band = Band::new(dockband_core::geometry::Orientation::Horizontal);
        let menu = DockItem::new("menu", Block::new(100, 24)).with_behavior(ItemBehavior::EXCLUSIVE);
        let id = band.append(menu, 0).unwrap();
        band.allocate(Rect::new(0, 0, 300, 24));
        let mut session = band.drag_begin(id).unwrap();
        assert!(band.drag_move(&mut session, 40, 10));
        assert_eq!(band.child_offset(id), Some(40));
    }

    #[test]
    fn test_band_link_reparents() {
        let (mut source, ids) = allocated_band(&[50, 50], &[0, 10], 300);
        let (mut target, _) = allocated_band(&[50], &[0], 300);
        let snapshot = target.take_snapshot(ids[0]);

        assert!(target.drag_to(&snapshot, &mut source, ids[0], Pos::new(150, 10)));
        assert!(!source.contains(ids[0]));
        assert!(target.contains(ids[0]));
        assert_eq!(target.floating_item(), Some(ids[0]));
        assert_eq!(target.child_offset(ids[0]), Some(100));
    }
}
