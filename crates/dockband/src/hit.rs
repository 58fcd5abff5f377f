//! Hit-testing a coordinate along the band axis.

use crate::band::Band;
use crate::drag::BandSnapshot;
use crate::types::SlotId;

/// Result of [`Band::find_where`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The coordinate is inside this slot.
    Occupied(SlotId),
    /// The coordinate is in free space following `after`
    /// (`None` for the start of the band).
    Empty { after: Option<SlotId> },
}

impl Band {
    /// Classify `coord` (on the band axis) against the current geometry.
    ///
    /// During a drag the snapshot geometry is used, so the answer does not
    /// drift as the floating slot pushes its neighbours around.
    pub fn find_where(&self, coord: i32) -> Hit {
        let snapshot = self.drag.clone();
        self.hit_test(snapshot.as_deref(), coord)
    }

    pub(crate) fn hit_test(&self, snapshot: Option<&BandSnapshot>, coord: i32) -> Hit {
        let axis = self.orientation;
        let origin = snapshot
            .map_or(self.allocation, |snap| snap.allocation())
            .start(axis);
        let coord = coord.max(origin);

        let visible: Vec<SlotId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.is_visible_slot(*id))
            .collect();

        let mut offs = origin;
        let mut previous = None;
        for (index, id) in visible.iter().copied().enumerate() {
            let last = index + 1 == visible.len();
            if Some(id) == self.floating {
                if last {
                    return Hit::Empty { after: previous };
                }
                continue;
            }

            let Some(alloc) = snapshot
                .and_then(|snap| snap.slot(id))
                .map(|snap| snap.alloc)
                .or_else(|| self.slot(id).map(|slot| slot.alloc))
            else {
                continue;
            };
            let start = alloc.start(axis);
            if offs <= coord && coord <= start {
                return Hit::Empty { after: previous };
            }
            offs = alloc.end(axis);
            if start < coord && coord < offs {
                return Hit::Occupied(id);
            }
            if last {
                return Hit::Empty { after: Some(id) };
            }
            previous = Some(id);
        }

        Hit::Empty { after: previous }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::allocated_band;
    use dockband_core::geometry::Orientation;

    fn slot_ids(band: &Band) -> Vec<SlotId> {
        band.slots().map(|(id, _)| id).collect()
    }

    #[test]
    fn test_empty_band() {
        let band = Band::new(Orientation::Horizontal);
        assert_eq!(band.find_where(42), Hit::Empty { after: None });
    }

    #[test]
    fn test_find_where_classifies_coordinates() {
        // A at 0..50, B at 60..110, C at 120..170
        let (band, _) = allocated_band(&[50, 50, 50], &[0, 10, 10], 300);
        let ids = slot_ids(&band);

        assert_eq!(band.find_where(0), Hit::Empty { after: None });
        assert_eq!(band.find_where(25), Hit::Occupied(ids[0]));
        assert_eq!(band.find_where(55), Hit::Empty { after: Some(ids[0]) });
        assert_eq!(band.find_where(80), Hit::Occupied(ids[1]));
        assert_eq!(band.find_where(200), Hit::Empty { after: Some(ids[2]) });
    }

    #[test]
    fn test_ties_resolve_toward_empty() {
        let (band, _) = allocated_band(&[50, 50], &[0, 10], 300);
        let ids = slot_ids(&band);
        // 50 is A's end and 60 is B's start
        assert_eq!(band.find_where(50), Hit::Empty { after: Some(ids[0]) });
        assert_eq!(band.find_where(60), Hit::Empty { after: Some(ids[0]) });
    }

    #[test]
    fn test_coordinates_before_origin_clamp() {
        let (band, _) = allocated_band(&[50], &[10], 300);
        assert_eq!(band.find_where(-40), Hit::Empty { after: None });
    }
}
