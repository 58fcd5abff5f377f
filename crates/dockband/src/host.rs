//! The dock host: bands around a client area, a floating pool, and the one
//! drag session that moves items between them.

use dockband_core::config::DockConfig;
use dockband_core::geometry::{Pos, Rect};
use dockband_core::profiling::{init_profiling, profile_function};
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::band::Band;
use crate::drag::{DragOrigin, DragPhase, DragSession};
use crate::error::{DockError, DockResult, InsertError};
use crate::floating::{FloatingItem, FloatingPool};
use crate::item::DockItem;
use crate::keynav::{KeyDirection, Modifiers};
use crate::layout::LayoutEntry;
use crate::placement::Detached;
use crate::types::{BandId, ItemId, Placement};

const DOCKED_PLACEMENTS: [Placement; 4] = [Placement::Top, Placement::Bottom, Placement::Left, Placement::Right];

/// A band and the window edge it hugs.
#[derive(Debug)]
pub struct BandEntry {
    placement: Placement,
    band: Band,
}

impl BandEntry {
    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn band(&self) -> &Band {
        &self.band
    }
}

/// Where an item currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLocation {
    Band {
        band: BandId,
        placement: Placement,
        /// Index among the bands of the same placement.
        band_index: usize,
        position: usize,
        offset: i32,
    },
    Floating {
        position: Pos<i32>,
    },
}

/// Owns every band and undocked item of one window.
#[derive(Debug)]
pub struct DockHost {
    config: DockConfig,
    bands: IndexMap<BandId, BandEntry>,
    floating: FloatingPool,
    session: Option<DragSession>,
    allocation: Rect<i32>,
    client_area: Rect<i32>,
}

impl Default for DockHost {
    fn default() -> Self {
        Self::new(DockConfig::default())
    }
}

impl DockHost {
    pub fn new(config: DockConfig) -> Self {
        if let Some(backend) = config.profiling.backend() {
            init_profiling(backend);
        }
        Self {
            config,
            bands: IndexMap::new(),
            floating: FloatingPool::new(),
            session: None,
            allocation: Rect::default(),
            client_area: Rect::default(),
        }
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    /// Check whether the pointer travelled far enough from `press` to start a drag.
    pub fn exceeds_drag_threshold(&self, press: Pos<i32>, pointer: Pos<i32>) -> bool {
        self.config
            .exceeds_threshold(pointer.x - press.x, pointer.y - press.y)
    }

    /// Append a new, empty band at `placement`.
    pub fn add_band(&mut self, placement: Placement) -> DockResult<BandId> {
        let Some(orientation) = placement.orientation() else {
            return Err(DockError::InvalidPlacement);
        };
        let band = Band::new(orientation);
        let id = band.id();
        self.bands.insert(id, BandEntry { placement, band });
        debug!(band = %id, ?placement, "band added");
        Ok(id)
    }

    pub fn band(&self, id: BandId) -> Option<&Band> {
        self.bands.get(&id).map(|entry| &entry.band)
    }

    pub fn band_entries(&self) -> impl Iterator<Item = &BandEntry> {
        self.bands.values()
    }

    /// Bands at `placement`, starting with the one nearest the window edge.
    pub fn bands(&self, placement: Placement) -> impl Iterator<Item = &Band> {
        self.bands
            .values()
            .filter(move |entry| entry.placement == placement)
            .map(|entry| &entry.band)
    }

    pub fn band_count(&self, placement: Placement) -> usize {
        self.bands(placement).count()
    }

    pub fn band_at(&self, placement: Placement, index: usize) -> Option<&Band> {
        self.bands(placement).nth(index)
    }

    /// Placement and index among same-placement bands.
    pub fn band_rank(&self, id: BandId) -> Option<(Placement, usize)> {
        let placement = self.bands.get(&id)?.placement;
        let index = self.bands(placement).position(|band| band.id() == id)?;
        Some((placement, index))
    }

    fn owner_index(&self, item: ItemId) -> Option<usize> {
        self.bands
            .values()
            .position(|entry| entry.band.contains(item))
    }

    /// Dock `item` into band `band_num` of `placement`, creating bands as needed.
    pub fn add_item(
        &mut self,
        item: DockItem,
        placement: Placement,
        band_num: usize,
        position: i32,
        offset: i32,
    ) -> Result<ItemId, InsertError> {
        if placement == Placement::Floating {
            return Err(InsertError::new(item, DockError::InvalidPlacement));
        }
        while self.band_count(placement) <= band_num {
            if let Err(reason) = self.add_band(placement) {
                return Err(InsertError::new(item, reason));
            }
        }
        let Some(id) = self.band_at(placement, band_num).map(|band| band.id()) else {
            return Err(InsertError::new(item, DockError::InvalidPlacement));
        };
        let Some(entry) = self.bands.get_mut(&id) else {
            return Err(InsertError::new(item, DockError::BandNotFound(id)));
        };
        entry.band.insert(item, offset, position)
    }

    /// Park `item` in the floating pool at `position`.
    pub fn add_floating_item(&mut self, item: DockItem, position: Pos<i32>) -> Result<ItemId, InsertError> {
        if !item.can_float() {
            return Err(InsertError::new(item, DockError::FloatingForbidden));
        }
        Ok(self.floating.insert(item, position))
    }

    pub fn floating_items(&self) -> impl Iterator<Item = &FloatingItem> {
        self.floating.iter()
    }

    /// Remove `item` from whichever band or pool holds it.
    ///
    /// Removing the item of an active drag abandons that drag.
    pub fn remove_item(&mut self, item: ItemId) -> Option<DockItem> {
        let removed = match self.owner_index(item) {
            Some(index) => self
                .bands
                .get_index_mut(index)
                .and_then(|(_, entry)| entry.band.remove(item)),
            None => self.floating.take(item).map(|floating| floating.item),
        };
        let Some(mut removed) = removed else {
            debug!(item = %item, "remove_item: unknown item");
            return None;
        };
        if self.session.as_ref().is_some_and(|session| session.item() == item) {
            warn!(item = %item, "dragged item removed; abandoning drag");
            if let Some(session) = self.session.take() {
                self.commit(session);
            }
        }
        removed.set_floating(false);
        removed.set_dragging(false);
        Some(removed)
    }

    pub fn item(&self, item: ItemId) -> Option<&DockItem> {
        self.bands
            .values()
            .find_map(|entry| entry.band.item(item))
            .or_else(|| self.floating.get(item).map(|floating| floating.item()))
    }

    pub fn item_mut(&mut self, item: ItemId) -> Option<&mut DockItem> {
        match self.owner_index(item) {
            Some(index) => self
                .bands
                .get_index_mut(index)
                .and_then(|(_, entry)| entry.band.item_mut(item)),
            None => self.floating.item_mut(item),
        }
    }

    pub fn locate(&self, item: ItemId) -> Option<ItemLocation> {
        for (id, entry) in &self.bands {
            let Some(position) = entry.band.index_of(item) else {
                continue;
            };
            let (placement, band_index) = self.band_rank(*id)?;
            return Some(ItemLocation::Band {
                band: *id,
                placement,
                band_index,
                position,
                offset: entry.band.child_offset(item).unwrap_or_default(),
            });
        }
        self.floating
            .get(item)
            .map(|floating| ItemLocation::Floating {
                position: floating.position(),
            })
    }

    pub fn get_item_by_name(&self, name: &str) -> Option<(ItemId, ItemLocation)> {
        let id = self
            .bands
            .values()
            .find_map(|entry| entry.band.get_item_by_name(name).map(|(item, _, _)| item.id()))
            .or_else(|| {
                self.floating
                    .iter()
                    .find(|floating| floating.item().name() == name)
                    .map(|floating| floating.item().id())
            })?;
        Some((id, self.locate(id)?))
    }

    /// Last rectangle handed to [`DockHost::allocate`].
    pub fn allocation(&self) -> Rect<i32> {
        self.allocation
    }

    /// Space left for the application after the bands took theirs.
    pub fn client_area(&self) -> Rect<i32> {
        self.client_area
    }

    /// Lay out every band inside `rect` and return the client area.
    ///
    /// Top bands stack downward from the top edge and bottom bands upward from
    /// the bottom edge; left and right bands then split the remaining height.
    pub fn allocate(&mut self, rect: Rect<i32>) -> Rect<i32> {
        profile_function!();
        self.allocation = rect;
        let mut client = rect;

        for entry in self.bands.values_mut() {
            let thickness = entry.band.cross_extent().min(client.height.max(0));
            let band_rect = match entry.placement {
                Placement::Top => {
                    let band_rect = Rect::new(client.x, client.y, client.width, thickness);
                    client.y += thickness;
                    band_rect
                }
                Placement::Bottom => Rect::new(client.x, client.y + client.height - thickness, client.width, thickness),
                _ => continue,
            };
            client.height -= thickness;
            entry.band.allocate(band_rect);
        }

        for entry in self.bands.values_mut() {
            let thickness = entry.band.cross_extent().min(client.width.max(0));
            let band_rect = match entry.placement {
                Placement::Left => {
                    let band_rect = Rect::new(client.x, client.y, thickness, client.height);
                    client.x += thickness;
                    band_rect
                }
                Placement::Right => Rect::new(client.x + client.width - thickness, client.y, thickness, client.height),
                _ => continue,
            };
            client.width -= thickness;
            entry.band.allocate(band_rect);
        }

        client.width = client.width.max(0);
        client.height = client.height.max(0);
        self.client_area = client;
        trace!(?rect, ?client, "host allocated");
        client
    }

    /// Re-allocate if any band asked for it. Returns whether anything ran.
    pub fn relayout(&mut self) -> bool {
        if !self.bands.values().any(|entry| entry.band.needs_relayout()) {
            return false;
        }
        self.allocate(self.allocation);
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start dragging `item`, snapshotting every band.
    ///
    /// A session left over from an earlier drag is committed first.
    pub fn drag_begin(&mut self, item: ItemId) -> DockResult<()> {
        if let Some(stale) = self.session.take() {
            warn!(item = %stale.item(), "drag session still active; committing it");
            self.commit(stale);
        }
        let origin = match self.locate(item) {
            Some(ItemLocation::Band {
                band,
                position,
                offset,
                ..
            }) => DragOrigin::Band {
                band,
                index: position,
                gap: offset,
            },
            Some(ItemLocation::Floating { position }) => DragOrigin::Floating { position },
            None => return Err(DockError::ItemNotFound(item)),
        };
        if self.item(item).is_some_and(|it| it.is_locked()) {
            return Err(DockError::ItemLocked(item));
        }
        let mut session = DragSession::new(item, origin);
        for entry in self.bands.values_mut() {
            session.capture(&mut entry.band);
        }
        if let Some(dragged) = self.item_mut(item) {
            dragged.set_dragging(true);
        }
        session.set_phase(DragPhase::Dragging);
        debug!(item = %item, ?origin, "drag started");
        self.session = Some(session);
        Ok(())
    }

    /// Move the dragged item to the pointer.
    ///
    /// The band under the pointer gets the item; outside every band the item
    /// is undocked into the floating pool if it and the config allow it.
    pub fn drag_move(&mut self, x: i32, y: i32) -> bool {
        profile_function!();
        let Some(mut session) = self.session.take() else {
            debug!("drag_move without a drag session");
            return false;
        };
        let pointer = Pos::new(x, y);
        session.record_pointer(pointer);
        let moved = self.route(&mut session, pointer);
        self.session = Some(session);
        moved
    }

    fn route(&mut self, session: &mut DragSession, pointer: Pos<i32>) -> bool {
        let item = session.item();
        let Some(target) = self
            .bands
            .values()
            .position(|entry| entry.band.allocation().contains(pointer))
        else {
            return self.undock(item, pointer);
        };
        let snapshot = match self.bands.get_index_mut(target) {
            Some((_, entry)) => session.capture(&mut entry.band),
            None => return false,
        };

        match self.owner_index(item) {
            Some(source) if source != target => {
                let mut entries: Vec<&mut BandEntry> = self.bands.values_mut().collect();
                let (target, source) = pair_mut(&mut entries, target, source);
                target.band.drag_to(&snapshot, &mut source.band, item, pointer)
            }
            Some(_) => match self.bands.get_index_mut(target) {
                Some((_, entry)) => entry.band.drag_to(&snapshot, &mut Detached, item, pointer),
                None => false,
            },
            None => match self.bands.get_index_mut(target) {
                Some((_, entry)) => entry.band.drag_to(&snapshot, &mut self.floating, item, pointer),
                None => false,
            },
        }
    }

    fn undock(&mut self, item: ItemId, pointer: Pos<i32>) -> bool {
        if self.floating.move_to(item, pointer) {
            return true;
        }
        if !self.config.allow_floating {
            trace!(item = %item, "undocking disabled");
            return false;
        }
        let Some((_, entry)) = self
            .owner_index(item)
            .and_then(|index| self.bands.get_index_mut(index))
        else {
            return false;
        };
        if !entry.band.item(item).is_some_and(|it| it.can_float()) {
            trace!(item = %item, "item refuses to float");
            return false;
        }
        let Some(mut dock_item) = entry.band.remove(item) else {
            return false;
        };
        dock_item.set_dragging(true);
        self.floating.insert(dock_item, pointer);
        debug!(item = %item, x = pointer.x, y = pointer.y, "undocked");
        true
    }

    /// Commit the drag, keeping the layout of the last move.
    ///
    /// Bands the drag left empty are removed.
    pub fn drag_end(&mut self) -> DockResult<DragSession> {
        let Some(session) = self.session.take() else {
            debug!("drag_end without a drag session");
            return Err(DockError::NotDragging);
        };
        Ok(self.commit(session))
    }

    fn commit(&mut self, mut session: DragSession) -> DragSession {
        let item = session.item();
        for entry in self.bands.values_mut() {
            if !entry.band.is_dragging() {
                continue;
            }
            if let Err(err) = entry.band.release_drag(item) {
                warn!(band = %entry.band.id(), "releasing drag: {}", err);
            }
        }

        let emptied: Vec<BandId> = session
            .snapshots()
            .filter(|snapshot| !snapshot.order().is_empty())
            .map(|snapshot| snapshot.band())
            .filter(|id| self.bands.get(id).is_some_and(|entry| entry.band.is_empty()))
            .collect();
        for id in emptied {
            self.bands.shift_remove(&id);
            debug!(band = %id, "removed band emptied by drag");
        }

        if let Some(dragged) = self.item_mut(item) {
            dragged.set_dragging(false);
        }
        session.set_phase(DragPhase::Committed);
        debug!(item = %item, "drag committed");
        session
    }

    /// Abort the drag: every band gets its order and gaps back and the item
    /// returns to where it started.
    pub fn drag_cancel(&mut self) -> DockResult<DragSession> {
        let Some(mut session) = self.session.take() else {
            debug!("drag_cancel without a drag session");
            return Err(DockError::NotDragging);
        };
        let item = session.item();
        let origin = session.origin();

        let detached = if self.in_original_slot(&session) {
            None
        } else {
            match self.owner_index(item) {
                Some(index) => self
                    .bands
                    .get_index_mut(index)
                    .and_then(|(_, entry)| entry.band.remove(item)),
                None if matches!(origin, DragOrigin::Band { .. }) => {
                    self.floating.take(item).map(|floating| floating.item)
                }
                None => None,
            }
        };

        for snapshot in session.snapshots() {
            let Some(entry) = self.bands.get_mut(&snapshot.band()) else {
                continue;
            };
            entry.band.restore_snapshot(snapshot);
            if let Err(err) = entry.band.release_drag(item) {
                warn!(band = %snapshot.band(), "releasing drag: {}", err);
            }
        }

        match origin {
            DragOrigin::Band { band, index, gap } => {
                if let Some(mut dock_item) = detached {
                    dock_item.set_floating(false);
                    let position = i32::try_from(index).unwrap_or(-1);
                    let refused = match self.bands.get_mut(&band) {
                        Some(entry) => entry.band.insert(dock_item, gap, position).err().map(InsertError::into_item),
                        None => Some(dock_item),
                    };
                    if let Some(dock_item) = refused {
                        warn!(item = %item, band = %band, "origin band refused the item; parking it");
                        self.floating
                            .insert(dock_item, session.pointer().unwrap_or_default());
                    }
                }
            }
            DragOrigin::Floating { position } => match detached {
                Some(dock_item) => {
                    self.floating.insert(dock_item, position);
                }
                None => {
                    self.floating.move_to(item, position);
                }
            },
        }

        if let Some(dragged) = self.item_mut(item) {
            dragged.set_dragging(false);
        }
        session.set_phase(DragPhase::Cancelled);
        debug!(item = %item, "drag cancelled");
        Ok(session)
    }

    /// Whether the dragged item still occupies the slot it started in.
    fn in_original_slot(&self, session: &DragSession) -> bool {
        let DragOrigin::Band { band, .. } = session.origin() else {
            return false;
        };
        let (Some(entry), Some(snapshot)) = (self.bands.get(&band), session.snapshot(band)) else {
            return false;
        };
        snapshot.floating().is_some() && entry.band.slot_of(session.item()) == snapshot.floating()
    }

    /// Ctrl+arrow on a docked item.
    ///
    /// Keys along the band reorder within it; keys across it move the item to
    /// the neighbouring band of the same placement.
    pub fn handle_key(&mut self, item: ItemId, direction: KeyDirection, modifiers: Modifiers) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some((&band_id, entry)) = self
            .owner_index(item)
            .and_then(|index| self.bands.get_index_mut(index))
        else {
            return false;
        };
        if entry.band.handle_key(item, direction, modifiers) {
            return true;
        }
        if !modifiers.contains(Modifiers::CTRL) || direction.axis() == entry.band.orientation() {
            return false;
        }

        let Some((placement, rank)) = self.band_rank(band_id) else {
            return false;
        };
        let step = if placement.grows_forward() {
            direction.step()
        } else {
            -direction.step()
        };
        let Some(target) = rank
            .checked_add_signed(step)
            .and_then(|rank| self.band_at(placement, rank))
            .map(|band| band.id())
        else {
            trace!(item = %item, ?direction, "no neighbouring band");
            return false;
        };
        self.transfer(item, band_id, target)
    }

    /// Move `item` from one band to another at the same position.
    fn transfer(&mut self, item: ItemId, from: BandId, to: BandId) -> bool {
        if !self.bands.contains_key(&to) {
            return false;
        }
        let Some(source) = self.bands.get_mut(&from) else {
            return false;
        };
        let position = source
            .band
            .index_of(item)
            .and_then(|index| i32::try_from(index).ok())
            .unwrap_or(-1);
        let gap = source.band.child_offset(item).unwrap_or_default();
        let Some(dock_item) = source.band.remove(item) else {
            return false;
        };

        let refused = match self.bands.get_mut(&to) {
            Some(target) => match target.band.insert(dock_item, gap, position) {
                Ok(_) => {
                    debug!(item = %item, from = %from, to = %to, "moved to neighbouring band");
                    return true;
                }
                Err(refused) => refused,
            },
            None => return false,
        };

        trace!(item = %item, band = %to, "neighbouring band refused: {}", refused.reason);
        let back = match self.bands.get_mut(&from) {
            Some(source) => source.band.insert(refused.into_item(), gap, position).err(),
            None => Some(refused),
        };
        if let Some(lost) = back {
            warn!(item = %item, "item fits nowhere; parking it");
            self.floating.insert(lost.into_item(), Pos::default());
        }
        false
    }

    /// Snapshot of every item's place, bands first then floating items.
    pub fn layout(&self) -> Vec<LayoutEntry> {
        let mut entries = Vec::new();
        for placement in DOCKED_PLACEMENTS {
            for (band_index, band) in self.bands(placement).enumerate() {
                entries.extend(band.layout_entries().map(|(name, position, offset)| {
                    LayoutEntry::docked(name, placement, band_index, position, offset)
                }));
            }
        }
        entries.extend(
            self.floating
                .iter()
                .map(|floating| LayoutEntry::floating(floating.item().name(), floating.position())),
        );
        entries
    }

    /// Put `item` back where `entry` says it was.
    pub fn restore(&mut self, item: DockItem, entry: &LayoutEntry) -> Result<ItemId, InsertError> {
        match entry.floating_at {
            Some(at) if entry.is_floating() => self.add_floating_item(item, at),
            _ => {
                let position = i32::try_from(entry.position).unwrap_or(-1);
                self.add_item(item, entry.placement, entry.band_index, position, entry.offset)
            }
        }
    }
}

/// Two distinct mutable elements of one slice.
fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(first, second);
    if first < second {
        let (head, tail) = items.split_at_mut(second);
        (&mut head[first], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(first);
        (&mut tail[0], &mut head[second])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockband_core::geometry::Orientation;

    use crate::test_support::{Block, block};
    use crate::types::ItemBehavior;

    fn host_with_top_band(extents: &[i32]) -> (DockHost, Vec<ItemId>) {
        let mut host = DockHost::default();
        let ids = extents
            .iter()
            .enumerate()
            .map(|(i, &extent)| {
                host.add_item(block(&format!("item{}", i), extent), Placement::Top, 0, -1, 0)
                    .unwrap()
            })
            .collect();
        host.allocate(Rect::new(0, 0, 400, 300));
        (host, ids)
    }

    #[test]
    fn test_add_band_refuses_floating() {
        let mut host = DockHost::default();
        assert_eq!(host.add_band(Placement::Floating), Err(DockError::InvalidPlacement));
        assert!(host.add_band(Placement::Left).is_ok());
        assert_eq!(host.band_count(Placement::Left), 1);
    }

    #[test]
    fn test_add_item_creates_bands() {
        let mut host = DockHost::default();
        let id = host.add_item(block("tools", 50), Placement::Top, 2, 0, 5).unwrap();
        assert_eq!(host.band_count(Placement::Top), 3);
        match host.locate(id) {
            Some(ItemLocation::Band {
                band_index, offset, ..
            }) => {
                assert_eq!(band_index, 2);
                assert_eq!(offset, 5);
            }
            other => panic!("unexpected location {:?}", other),
        }
    }

    #[test]
    fn test_floating_item_rules() {
        let mut host = DockHost::default();
        let pinned = DockItem::new("pinned", Block::new(50, 20)).with_behavior(ItemBehavior::NEVER_FLOATING);
        let err = host.add_floating_item(pinned, Pos::new(0, 0)).unwrap_err();
        assert_eq!(err.reason, DockError::FloatingForbidden);

        let id = host.add_floating_item(block("palette", 50), Pos::new(5, 6)).unwrap();
        assert_eq!(host.locate(id), Some(ItemLocation::Floating { position: Pos::new(5, 6) }));
    }

    #[test]
    fn test_allocate_stacks_bands() {
        let mut host = DockHost::default();
        host.add_item(block("top", 50), Placement::Top, 0, -1, 0).unwrap();
        host.add_item(block("top2", 50), Placement::Top, 1, -1, 0).unwrap();
        host.add_item(block("bottom", 50), Placement::Bottom, 0, -1, 0).unwrap();
        host.add_item(block("left", 50), Placement::Left, 0, -1, 0).unwrap();
        host.add_item(block("right", 50), Placement::Right, 0, -1, 0).unwrap();

        let client = host.allocate(Rect::new(0, 0, 400, 300));
        assert_eq!(host.band_at(Placement::Top, 0).unwrap().allocation(), Rect::new(0, 0, 400, 20));
        assert_eq!(host.band_at(Placement::Top, 1).unwrap().allocation(), Rect::new(0, 20, 400, 20));
        assert_eq!(host.band_at(Placement::Bottom, 0).unwrap().allocation(), Rect::new(0, 280, 400, 20));
        assert_eq!(host.band_at(Placement::Left, 0).unwrap().allocation(), Rect::new(0, 40, 20, 240));
        assert_eq!(host.band_at(Placement::Right, 0).unwrap().allocation(), Rect::new(380, 40, 20, 240));
        assert_eq!(client, Rect::new(20, 40, 360, 240));
    }

    #[test]
    fn test_relayout_only_when_dirty() {
        let (mut host, ids) = host_with_top_band(&[50, 50]);
        assert!(!host.relayout());
        assert!(host.remove_item(ids[0]).is_some());
        assert!(host.relayout());
        assert!(!host.relayout());
    }

    #[test]
    fn test_drag_within_band() {
        let (mut host, ids) = host_with_top_band(&[50, 50, 50]);
        host.drag_begin(ids[0]).unwrap();
        assert!(host.drag_move(120, 10));
        let session = host.drag_end().unwrap();
        assert_eq!(session.phase(), DragPhase::Committed);
        assert!(matches!(host.locate(ids[0]), Some(ItemLocation::Band { position: 2, .. })));
    }

    #[test]
    fn test_drag_end_without_begin() {
        let mut host = DockHost::default();
        assert_eq!(host.drag_end().unwrap_err(), DockError::NotDragging);
        assert_eq!(host.drag_cancel().unwrap_err(), DockError::NotDragging);
        assert!(!host.drag_move(1, 1));
    }

    #[test]
    fn test_undock_to_floating_pool() {
        let (mut host, ids) = host_with_top_band(&[50, 50]);
        host.drag_begin(ids[1]).unwrap();
        assert!(host.drag_move(200, 200));
        host.drag_end().unwrap();

        assert_eq!(host.locate(ids[1]), Some(ItemLocation::Floating { position: Pos::new(200, 200) }));
        assert!(host.item(ids[1]).unwrap().is_floating());
        assert_eq!(host.band_at(Placement::Top, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_undock_refused_when_disabled() {
        let mut host = DockHost::new(DockConfig::default().allow_floating(false));
        let id = host.add_item(block("tools", 50), Placement::Top, 0, -1, 0).unwrap();
        host.allocate(Rect::new(0, 0, 400, 300));
        host.drag_begin(id).unwrap();
        assert!(!host.drag_move(200, 200));
        assert!(matches!(host.locate(id), Some(ItemLocation::Band { .. })));
    }

    #[test]
    fn test_stale_session_is_committed() {
        let (mut host, ids) = host_with_top_band(&[50, 50]);
        host.drag_begin(ids[0]).unwrap();
        host.drag_begin(ids[1]).unwrap();
        assert_eq!(host.drag_session().map(|s| s.item()), Some(ids[1]));
        let band = host.band_at(Placement::Top, 0).unwrap();
        assert_eq!(band.floating_item(), Some(ids[1]));
    }

    #[test]
    fn test_locked_item_cannot_drag() {
        let mut host = DockHost::default();
        let locked = DockItem::new("locked", Block::new(50, 20)).with_behavior(ItemBehavior::LOCKED);
        let id = host.add_item(locked, Placement::Top, 0, -1, 0).unwrap();
        assert_eq!(host.drag_begin(id), Err(DockError::ItemLocked(id)));
        assert!(!host.is_dragging());
    }

    #[test]
    fn test_pair_mut() {
        let mut items = [1, 2, 3];
        let (a, b) = pair_mut(&mut items, 2, 0);
        std::mem::swap(a, b);
        assert_eq!(items, [3, 2, 1]);
    }

    #[test]
    fn test_parked_item_may_change_behavior() {
        let mut host = DockHost::default();
        let id = host.add_floating_item(block("palette", 50), Pos::new(5, 6)).unwrap();
        let parked = host.item_mut(id).unwrap();
        assert!(parked.is_floating());
        assert!(parked.set_behavior(ItemBehavior::NEVER_VERTICAL));
        assert!(parked.set_orientation(Orientation::Horizontal));
    }

    #[test]
    fn test_dragged_item_is_frozen_until_drag_ends() {
        let (mut host, ids) = host_with_top_band(&[50, 50]);
        host.drag_begin(ids[1]).unwrap();
        assert!(host.drag_move(200, 200));
        let dragged = host.item_mut(ids[1]).unwrap();
        assert!(dragged.is_dragging());
        assert!(!dragged.set_behavior(ItemBehavior::LOCKED));
        assert!(!dragged.set_orientation(Orientation::Vertical));

        host.drag_end().unwrap();
        let parked = host.item_mut(ids[1]).unwrap();
        assert!(parked.is_floating());
        assert!(!parked.is_dragging());
        assert!(parked.set_orientation(Orientation::Vertical));
        assert!(parked.set_behavior(ItemBehavior::LOCKED));
    }
}
