//! Measurement and the three allocation regimes.

use dockband_core::geometry::Rect;
use dockband_core::profiling::profile_function;
use tracing::trace;

use crate::band::Band;
use crate::types::SlotId;

/// Aggregate size request of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BandRequisition {
    pub min_total: i32,
    pub gap_total: i32,
    pub natural_total: i32,
    pub cross_extent: i32,
}

/// How the last allocation distributed the available space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regime {
    /// A lone exclusive item took the whole rectangle.
    Exclusive,
    /// Not even the minimum extents fit: no gaps, first come first served.
    Compressed,
    /// Extents fit, gaps are scaled by `factor`.
    Proportional { factor: f32 },
    /// Everything fits.
    Expanded,
}

impl Regime {
    /// Pick the regime for `space` pixels against the band totals.
    pub fn select(space: i32, min_total: i32, gap_total: i32) -> Self {
        if space <= min_total {
            Regime::Compressed
        } else if space < min_total + gap_total {
            let shortfall = (min_total + gap_total - space) as f32;
            Regime::Proportional {
                factor: 1.0 - shortfall / gap_total as f32,
            }
        } else {
            Regime::Expanded
        }
    }
}

impl Band {
    /// Recompute per-slot extents and the band totals.
    pub fn measure(&mut self) -> BandRequisition {
        profile_function!();
        let axis = self.orientation;
        let mut req = BandRequisition::default();

        for id in &self.order {
            let Some(slot) = self.slots.get_mut(id.0) else {
                continue;
            };
            if !slot.item.is_visible() {
                slot.natural_extent = 0;
                slot.min_extent = 0;
                slot.cross_extent = 0;
                continue;
            }
            let natural = slot.item.size_request();
            let preferred = slot.item.preferred_extent().map_or(0, |size| size.main(axis));
            slot.natural_extent = natural.main(axis).max(0);
            slot.min_extent = slot.natural_extent.max(preferred);
            slot.cross_extent = natural.cross(axis).max(0);

            req.min_total += slot.min_extent;
            req.natural_total += slot.natural_extent;
            req.gap_total += slot.preferred_gap;
            req.cross_extent = req.cross_extent.max(slot.cross_extent);
        }

        self.min_total = req.min_total;
        self.gap_total = req.gap_total;
        self.natural_total = req.natural_total;
        self.cross_extent = req.cross_extent;
        req
    }

    /// Lay the slots out inside `rect` and recompute their slack.
    pub fn allocate(&mut self, rect: Rect<i32>) -> Regime {
        profile_function!();
        let axis = self.orientation;
        let cross_axis = axis.perpendicular();
        let (cross_start, cross) = (rect.start(cross_axis), rect.extent(cross_axis));
        let space = rect.extent(axis).max(0);

        self.allocation = rect;
        self.clear_relayout();

        if let Some(id) = self.sole_exclusive() {
            if let Some(slot) = self.slots.get_mut(id.0) {
                slot.actual_gap = 0;
                slot.alloc = rect;
            }
            self.calc_spaces();
            trace!(band = %self.id, space, "exclusive item takes the band");
            return Regime::Exclusive;
        }

        let regime = Regime::select(space, self.min_total, self.gap_total);
        let mut cursor = rect.start(axis);
        let mut budget = space;
        let mut fitting = true;

        for id in &self.order {
            let Some(slot) = self.slots.get_mut(id.0) else {
                continue;
            };
            if !slot.item.is_visible() {
                slot.actual_gap = 0;
                slot.alloc = Rect::from_spans(axis, cursor, 0, cross_start, cross);
                continue;
            }
            let (gap, extent) = match regime {
                Regime::Compressed => {
                    let extent = if fitting && budget >= slot.min_extent {
                        slot.min_extent
                    } else if fitting {
                        fitting = false;
                        budget
                    } else {
                        slot.natural_extent.min(budget)
                    };
                    budget -= extent;
                    (0, extent)
                }
                Regime::Proportional { factor } => {
                    ((slot.preferred_gap as f32 * factor).round() as i32, slot.min_extent)
                }
                Regime::Expanded | Regime::Exclusive => (slot.preferred_gap, slot.min_extent),
            };
            slot.actual_gap = gap;
            cursor += gap;
            slot.alloc = Rect::from_spans(axis, cursor, extent, cross_start, cross);
            cursor += extent;
        }

        self.calc_spaces();
        trace!(
            band = %self.id,
            ?regime,
            space,
            min_total = self.min_total,
            gap_total = self.gap_total,
            "allocated"
        );
        regime
    }

    fn sole_exclusive(&self) -> Option<SlotId> {
        match self.order.as_slice() {
            [id] => self
                .slot(*id)
                .filter(|slot| slot.item.is_exclusive() && slot.item.is_visible())
                .map(|_| *id),
            _ => None,
        }
    }

    /// Recompute `space_before` and `space_after` over the solid slots.
    pub(crate) fn calc_spaces(&mut self) {
        let axis = self.orientation;
        let solid: Vec<SlotId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.is_solid(*id))
            .collect();
        let Some(last) = solid.last().and_then(|id| self.slot(*id)) else {
            return;
        };
        let mut after = (self.allocation.end(axis) - last.alloc.end(axis)).max(0);

        let mut before = 0;
        for id in &solid {
            let Some(slot) = self.slots.get_mut(id.0) else {
                continue;
            };
            before += slot.actual_gap;
            slot.space_before = before;
            before += slot.alloc.extent(axis) - slot.natural_extent;
        }

        for id in solid.iter().rev() {
            let Some(slot) = self.slots.get_mut(id.0) else {
                continue;
            };
            after += slot.alloc.extent(axis) - slot.natural_extent;
            slot.space_after = after;
            after += slot.actual_gap;
        }
    }
}
