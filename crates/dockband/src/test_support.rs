//! Fixed-size widgets and band fixtures for unit tests.

use crate::band::Band;
use crate::item::{DockItem, DockWidget};
use crate::types::ItemId;
use dockband_core::geometry::{Orientation, Rect, Size};

/// Widget with a fixed horizontal size; vertical size is the transpose.
pub struct Block {
    size: Size<i32>,
    preferred: Option<Size<i32>>,
    visible: bool,
}

impl Block {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            preferred: None,
            visible: true,
        }
    }

    pub fn preferred(mut self, width: i32, height: i32) -> Self {
        self.preferred = Some(Size::new(width, height));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl DockWidget for Block {
    fn size_request(&self, orientation: Orientation) -> Size<i32> {
        match orientation {
            Orientation::Horizontal => self.size,
            Orientation::Vertical => self.size.transposed(),
        }
    }

    fn preferred_extent(&self) -> Option<Size<i32>> {
        self.preferred
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn debug_name(&self) -> &str {
        "Block"
    }
}

pub fn block(name: &str, extent: i32) -> DockItem {
    DockItem::new(name, Block::new(extent, 20))
}

/// Horizontal band with one 20px-tall item per extent, appended in order.
pub fn band_with(extents: &[i32], gaps: &[i32]) -> (Band, Vec<ItemId>) {
    let mut band = Band::new(Orientation::Horizontal);
    let ids = extents
        .iter()
        .zip(gaps)
        .enumerate()
        .map(|(i, (&extent, &gap))| {
            band.append(block(&format!("item{}", i), extent), gap)
                .expect("fixture insert")
        })
        .collect();
    (band, ids)
}

/// Band as [`band_with`], allocated across `space` pixels starting at x = 0.
pub fn allocated_band(extents: &[i32], gaps: &[i32], space: i32) -> (Band, Vec<ItemId>) {
    let (mut band, ids) = band_with(extents, gaps);
    band.allocate(Rect::new(0, 0, space, 20));
    (band, ids)
}
