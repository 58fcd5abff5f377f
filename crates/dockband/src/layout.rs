//! Layout persistence records.

use dockband_core::geometry::Pos;

use crate::types::Placement;

/// One item's place in a saved layout.
///
/// Docked items record their band and position; floating items record the
/// point they were parked at. Feed entries back through
/// [`crate::DockHost::restore`] in order to rebuild the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    pub name: String,
    pub placement: Placement,
    /// Band index among the bands of the same placement.
    pub band_index: usize,
    /// Position inside the band.
    pub position: usize,
    /// Preferred gap before the item.
    pub offset: i32,
    /// Parking point when `placement` is [`Placement::Floating`].
    pub floating_at: Option<Pos<i32>>,
}

impl LayoutEntry {
    pub fn docked(name: impl Into<String>, placement: Placement, band_index: usize, position: usize, offset: i32) -> Self {
        Self {
            name: name.into(),
            placement,
            band_index,
            position,
            offset,
            floating_at: None,
        }
    }

    pub fn floating(name: impl Into<String>, at: Pos<i32>) -> Self {
        Self {
            name: name.into(),
            placement: Placement::Floating,
            band_index: 0,
            position: 0,
            offset: 0,
            floating_at: Some(at),
        }
    }

    pub fn is_floating(&self) -> bool {
        self.placement == Placement::Floating
    }
}
