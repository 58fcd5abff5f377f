//! Dockband - band docking layout engine
//!
//! A band is a row (or column) of movable items laid out along one axis:
//! - Measured and allocated in three regimes (expanded, proportional, compressed)
//! - Items dragged live, pushing their neighbours out of the way
//! - Drags that cross bands or tear items off into a floating pool
//! - Ctrl+arrow keyboard reordering
//! - A saved-layout stream that rebuilds the same arrangement
//!
//! ## Quick Start
//!
//! ```rust
//! use dockband::{DockHost, DockItem, DockWidget, Placement};
//! use dockband::geometry::{Orientation, Rect, Size};
//!
//! struct Toolbar;
//!
//! impl DockWidget for Toolbar {
//!     fn size_request(&self, orientation: Orientation) -> Size<i32> {
//!         match orientation {
//!             Orientation::Horizontal => Size::new(120, 24),
//!             Orientation::Vertical => Size::new(24, 120),
//!         }
//!     }
//! }
//!
//! let mut host = DockHost::default();
//! let file = host.add_item(DockItem::new("file", Toolbar), Placement::Top, 0, -1, 0).unwrap();
//! let edit = host.add_item(DockItem::new("edit", Toolbar), Placement::Top, 0, -1, 10).unwrap();
//! let client = host.allocate(Rect::new(0, 0, 800, 600));
//! assert_eq!(client, Rect::new(0, 24, 800, 576));
//!
//! // Drag "file" past "edit"
//! host.drag_begin(file).unwrap();
//! host.drag_move(200, 12);
//! host.drag_end().unwrap();
//! host.relayout();
//!
//! let band = host.band_at(Placement::Top, 0).unwrap();
//! assert_eq!(band.index_of(edit), Some(0));
//! ```

pub mod allocate;
pub mod band;
pub mod drag;
pub mod error;
pub mod floating;
pub mod hit;
pub mod host;
pub mod item;
pub mod keynav;
pub mod layout;
pub mod placement;
pub mod slot;
pub mod types;

#[cfg(test)]
mod test_support;

pub use allocate::{BandRequisition, Regime};
pub use band::Band;
pub use drag::{BandSnapshot, DragOrigin, DragPhase, DragSession, SlotSnapshot};
pub use error::{DockError, DockResult, InsertError};
pub use floating::{FloatingItem, FloatingPool};
pub use hit::Hit;
pub use host::{BandEntry, DockHost, ItemLocation};
pub use item::{DockItem, DockWidget};
pub use keynav::{KeyDirection, Modifiers};
pub use layout::LayoutEntry;
pub use placement::{Detached, HostLink};
pub use slot::Slot;
pub use types::{BandId, ItemBehavior, ItemId, Placement, SlotId};

// Re-export shared building blocks
pub use dockband_core::config::{DockConfig, ProfilingMode};
pub use dockband_core::geometry;
