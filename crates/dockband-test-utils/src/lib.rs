//! Test utilities for dockband.
//!
//! Fixed-size widgets, band and host fixtures, and a logging hook for
//! integration tests and benches.
//!
//! ```rust
//! use dockband_test_utils::band_of;
//!
//! let (band, ids) = band_of(&[50, 50, 50], &[0, 10, 10], 300);
//! assert_eq!(band.len(), ids.len());
//! ```

use dockband::geometry::{Orientation, Rect, Size};
use dockband::{Band, DockHost, DockItem, DockWidget, ItemBehavior, ItemId, Placement};

/// Thickness of every fixture item across its band.
pub const THICKNESS: i32 = 20;

/// Widget with a fixed size; turning it vertical swaps width and height.
#[derive(Debug, Clone)]
pub struct FixedWidget {
    size: Size<i32>,
    preferred: Option<Size<i32>>,
    visible: bool,
}

impl FixedWidget {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            preferred: None,
            visible: true,
        }
    }

    /// Ask for more room than the natural size.
    pub fn with_preferred(mut self, width: i32, height: i32) -> Self {
        self.preferred = Some(Size::new(width, height));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl DockWidget for FixedWidget {
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
        "FixedWidget"
    }
}

/// Item `extent` long and [`THICKNESS`] thick.
pub fn horizontal(name: &str, extent: i32) -> DockItem {
    DockItem::new(name, FixedWidget::new(extent, THICKNESS))
}

/// As [`horizontal`], with behaviour flags.
pub fn item_with(name: &str, extent: i32, behavior: ItemBehavior) -> DockItem {
    horizontal(name, extent).with_behavior(behavior)
}

/// Horizontal band of `item0`, `item1`, ... allocated across `space` pixels.
pub fn band_of(extents: &[i32], gaps: &[i32], space: i32) -> (Band, Vec<ItemId>) {
    let mut band = Band::new(Orientation::Horizontal);
    let ids = extents
        .iter()
        .zip(gaps)
        .enumerate()
        .map(|(i, (&extent, &gap))| {
            band.append(horizontal(&format!("item{}", i), extent), gap)
                .expect("fixture insert")
        })
        .collect();
    band.allocate(Rect::new(0, 0, space, THICKNESS));
    (band, ids)
}

/// Host with one top band holding `item0`, `item1`, ... in a `width` x 300 window.
pub fn host_with_top_band(extents: &[i32], gaps: &[i32], width: i32) -> (DockHost, Vec<ItemId>) {
    let mut host = DockHost::default();
    let ids = extents
        .iter()
        .zip(gaps)
        .enumerate()
        .map(|(i, (&extent, &gap))| {
            host.add_item(horizontal(&format!("item{}", i), extent), Placement::Top, 0, -1, gap)
                .expect("fixture insert")
        })
        .collect();
    host.allocate(Rect::new(0, 0, width, 300));
    (host, ids)
}

/// Main-axis `(name, start)` pairs of a band in display order.
pub fn starts(band: &Band) -> Vec<(String, i32)> {
    let axis = band.orientation();
    band.slots()
        .map(|(_, slot)| (slot.item().name().to_owned(), slot.alloc().start(axis)))
        .collect()
}

/// `(name, preferred gap)` pairs of a band in display order.
pub fn gaps(band: &Band) -> Vec<(String, i32)> {
    band.slots()
        .map(|(_, slot)| (slot.item().name().to_owned(), slot.preferred_gap()))
        .collect()
}

/// Install a test-friendly tracing subscriber; repeated calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
