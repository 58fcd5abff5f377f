//! Drag sessions and the per-band snapshots they carry.
//!
//! A drag starts with [`Band::drag_begin`] (or [`crate::DockHost::drag_begin`]),
//! which freezes the band geometry into a [`BandSnapshot`]. Every subsequent
//! move is computed against that frozen picture, so a pointer wiggling back
//! and forth always reproduces the same layout for the same position.

use std::sync::Arc;

use dockband_core::alloc::HashMap;
use dockband_core::geometry::{Pos, Rect};
use dockband_core::profiling::profile_function;
use tracing::{debug, trace, warn};

use crate::band::Band;
use crate::error::{DockError, DockResult};
use crate::placement::Detached;
use crate::types::{BandId, ItemId, SlotId};

/// Frozen geometry of one slot at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSnapshot {
    pub alloc: Rect<i32>,
    /// Gap as if the dragged item had already left the band.
    pub gap: i32,
    pub space_before: i32,
    pub space_after: i32,
}

/// Immutable picture of a band taken when a drag starts.
#[derive(Debug, Clone)]
pub struct BandSnapshot {
    band: BandId,
    allocation: Rect<i32>,
    floating: Option<SlotId>,
    order: Vec<SlotId>,
    original_gaps: HashMap<SlotId, i32>,
    slots: HashMap<SlotId, SlotSnapshot>,
}

impl BandSnapshot {
    pub fn band(&self) -> BandId {
        self.band
    }

    /// Band rectangle at drag start.
    pub fn allocation(&self) -> Rect<i32> {
        self.allocation
    }

    /// Slot of the dragged item, if it started in this band.
    pub fn floating(&self) -> Option<SlotId> {
        self.floating
    }

    /// Display order at drag start.
    pub fn order(&self) -> &[SlotId] {
        &self.order
    }

    pub fn slot(&self, id: SlotId) -> Option<&SlotSnapshot> {
        self.slots.get(&id)
    }

    /// Preferred gap of `id` before the drag touched it.
    pub fn original_gap(&self, id: SlotId) -> Option<i32> {
        self.original_gaps.get(&id).copied()
    }
}

/// Lifecycle of a [`DragSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Committed,
    Cancelled,
}

/// Where the dragged item was when the drag started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOrigin {
    Band { band: BandId, index: usize, gap: i32 },
    Floating { position: Pos<i32> },
}

/// State of one drag, passed explicitly to every move.
#[derive(Debug)]
pub struct DragSession {
    item: ItemId,
    phase: DragPhase,
    origin: DragOrigin,
    snapshots: HashMap<BandId, Arc<BandSnapshot>>,
    pointer: Option<Pos<i32>>,
}

impl DragSession {
    pub(crate) fn new(item: ItemId, origin: DragOrigin) -> Self {
        Self {
            item,
            phase: DragPhase::Idle,
            origin,
            snapshots: HashMap::default(),
            pointer: None,
        }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    pub fn origin(&self) -> DragOrigin {
        self.origin
    }

    /// Last pointer position handed to a move.
    pub fn pointer(&self) -> Option<Pos<i32>> {
        self.pointer
    }

    pub fn snapshot(&self, band: BandId) -> Option<Arc<BandSnapshot>> {
        self.snapshots.get(&band).cloned()
    }

    pub(crate) fn snapshots(&self) -> impl Iterator<Item = &Arc<BandSnapshot>> {
        self.snapshots.values()
    }

    /// Snapshot `band` unless this session already holds one for it.
    pub(crate) fn capture(&mut self, band: &mut Band) -> Arc<BandSnapshot> {
        if let Some(snapshot) = self.snapshots.get(&band.id()) {
            return snapshot.clone();
        }
        let snapshot = band.take_snapshot(self.item);
        self.snapshots.insert(band.id(), snapshot.clone());
        snapshot
    }

    pub(crate) fn set_phase(&mut self, phase: DragPhase) {
        trace!(item = %self.item, from = ?self.phase, to = ?phase, "drag phase");
        self.phase = phase;
    }

    pub(crate) fn record_pointer(&mut self, pointer: Pos<i32>) {
        self.pointer = Some(pointer);
    }
}

impl Band {
    /// Freeze the band geometry for a drag of `item`.
    ///
    /// The slot following the dragged one absorbs the hole it leaves, and
    /// preferred gaps are pinned to what the last allocation actually gave.
    pub(crate) fn take_snapshot(&mut self, item: ItemId) -> Arc<BandSnapshot> {
        profile_function!();
        if self.drag.is_some() {
            warn!(band = %self.id, "replacing stale drag snapshot");
        }
        let axis = self.orientation;
        let mut slots = HashMap::default();
        let mut original_gaps = HashMap::default();
        let mut floating = None;
        let mut floating_natural = 0;
        let mut extra = 0;

        for id in &self.order {
            let Some(slot) = self.slots.get_mut(id.0) else {
                continue;
            };
            original_gaps.insert(*id, slot.preferred_gap);
            slots.insert(
                *id,
                SlotSnapshot {
                    alloc: slot.alloc,
                    gap: slot.actual_gap + extra,
                    space_before: slot.space_before,
                    space_after: slot.space_after,
                },
            );
            slot.preferred_gap = slot.actual_gap;

            if slot.item.id() == item {
                floating = Some(*id);
                floating_natural = slot.natural_extent;
                extra = slot.alloc.extent(axis) + slot.actual_gap;
                slot.item.set_floating(true);
                slot.item.set_dragging(true);
            } else {
                extra = 0;
            }
        }

        if let Some(index) = floating.and_then(|id| self.position(id)) {
            for (position, id) in self.order.iter().enumerate() {
                let Some(snap) = slots.get_mut(id) else {
                    continue;
                };
                if position < index {
                    snap.space_after += floating_natural;
                } else if position > index {
                    snap.space_before += floating_natural;
                }
            }
        }

        self.floating = floating;
        self.measure();

        let snapshot = Arc::new(BandSnapshot {
            band: self.id,
            allocation: self.allocation,
            floating,
            order: self.order.clone(),
            original_gaps,
            slots,
        });
        self.drag = Some(snapshot.clone());
        trace!(band = %self.id, item = %item, ?floating, "drag snapshot taken");
        snapshot
    }

    /// Start dragging `item` within this band.
    ///
    /// A drag still in progress on this band is committed first.
    pub fn drag_begin(&mut self, item: ItemId) -> DockResult<DragSession> {
        if !self.contains(item) {
            return Err(DockError::ItemNotFound(item));
        }
        if self.item(item).is_some_and(|it| it.is_locked()) {
            return Err(DockError::ItemLocked(item));
        }
        if self.is_dragging() {
            let stale = self.floating_item().unwrap_or(item);
            warn!(band = %self.id, item = %stale, "drag still in progress; committing it");
            self.release_drag(stale)?;
        }
        let Some(index) = self.index_of(item) else {
            return Err(DockError::ItemNotFound(item));
        };
        let gap = self.child_offset(item).unwrap_or_default();
        let mut session = DragSession::new(
            item,
            DragOrigin::Band {
                band: self.id,
                index,
                gap,
            },
        );
        session.capture(self);
        session.set_phase(DragPhase::Dragging);
        debug!(band = %self.id, item = %item, "drag started");
        Ok(session)
    }

    /// Move the dragged item to the pointer position.
    ///
    /// Returns false when the position is refused; the band is then left
    /// exactly as it was before the call.
    pub fn drag_move(&mut self, session: &mut DragSession, x: i32, y: i32) -> bool {
        if !session.is_dragging() {
            debug!(band = %self.id, phase = ?session.phase(), "drag_move outside a drag");
            return false;
        }
        let Some(snapshot) = session.snapshot(self.id) else {
            debug!(band = %self.id, "drag_move on a band the session never saw");
            return false;
        };
        let pointer = Pos::new(x, y);
        session.record_pointer(pointer);
        self.drag_to(&snapshot, &mut Detached, session.item(), pointer)
    }

    /// Commit the drag: the gaps written by the last move stay.
    pub fn drag_end(&mut self, session: &mut DragSession) -> DockResult<()> {
        if !session.is_dragging() {
            return Err(DockError::NotDragging);
        }
        self.release_drag(session.item())?;
        session.set_phase(DragPhase::Committed);
        debug!(band = %self.id, item = %session.item(), "drag committed");
        Ok(())
    }

    /// Abort the drag, restoring the order and gaps from before it started.
    pub fn drag_cancel(&mut self, session: &mut DragSession) -> DockResult<()> {
        if !session.is_dragging() {
            return Err(DockError::NotDragging);
        }
        let snapshot = session.snapshot(self.id).ok_or(DockError::NotDragging)?;
        self.check_release(session.item())?;
        self.restore_snapshot(&snapshot);
        self.release_drag(session.item())?;
        session.set_phase(DragPhase::Cancelled);
        debug!(band = %self.id, item = %session.item(), "drag cancelled");
        Ok(())
    }

    fn check_release(&self, item: ItemId) -> DockResult<()> {
        if self.drag.is_none() {
            return Err(DockError::NotDragging);
        }
        match self.floating_item() {
            Some(found) if found != item => Err(DockError::ItemMismatch {
                expected: item,
                found,
            }),
            _ => Ok(()),
        }
    }

    /// Drop the floating mark and the snapshot.
    pub(crate) fn release_drag(&mut self, item: ItemId) -> DockResult<()> {
        self.check_release(item)?;
        if let Some(slot) = self.floating.and_then(|id| self.slots.get_mut(id.0)) {
            slot.item.set_floating(false);
            slot.item.set_dragging(false);
        }
        self.floating = None;
        self.drag = None;
        self.measure();
        self.request_relayout();
        self.debug_check_invariants();
        Ok(())
    }

    /// Put order and preferred gaps back the way `snapshot` found them.
    ///
    /// Slots that joined after the snapshot keep their relative order at the
    /// end of the band.
    pub(crate) fn restore_snapshot(&mut self, snapshot: &BandSnapshot) {
        let mut order: Vec<SlotId> = snapshot
            .order()
            .iter()
            .copied()
            .filter(|id| self.order.contains(id))
            .collect();
        order.extend(self.order.iter().copied().filter(|id| !snapshot.order().contains(id)));
        self.order = order;

        for id in &self.order {
            if let (Some(slot), Some(gap)) = (self.slots.get_mut(id.0), snapshot.original_gap(*id)) {
                slot.set_gap(gap);
            }
        }
        self.measure();
        self.request_relayout();
    }
}
