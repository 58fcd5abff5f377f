//! Dockable items and the widget capability they wrap.

use crate::types::{ItemBehavior, ItemId};
use dockband_core::geometry::{Orientation, Size};
use std::fmt;

/// Size-query capability of the widget behind a dock item.
///
/// The embedding toolkit implements this per widget kind; the band never
/// inspects the concrete type.
pub trait DockWidget: Send + Sync {
    /// Natural size of the widget when laid out with `orientation`.
    fn size_request(&self, orientation: Orientation) -> Size<i32>;

    /// Optional size override that may exceed the natural size.
    ///
    /// The band uses the component along its axis as a floor for the slot.
    fn preferred_extent(&self) -> Option<Size<i32>> {
        None
    }

    /// Hidden widgets take no space and are skipped by hit-testing.
    fn is_visible(&self) -> bool {
        true
    }

    /// Get the widget's name for debugging.
    fn debug_name(&self) -> &str {
        "DockWidget"
    }
}

/// One dockable unit: a widget plus its docking behaviour.
pub struct DockItem {
    id: ItemId,
    name: String,
    behavior: ItemBehavior,
    orientation: Orientation,
    floating: bool,
    dragging: bool,
    widget: Box<dyn DockWidget>,
}

impl DockItem {
    /// Create a horizontal item with no behaviour restrictions.
    pub fn new(name: impl Into<String>, widget: impl DockWidget + 'static) -> Self {
        Self {
            id: ItemId::next(),
            name: name.into(),
            behavior: ItemBehavior::NORMAL,
            orientation: Orientation::Horizontal,
            floating: false,
            dragging: false,
            widget: Box::new(widget),
        }
    }

    /// Set the behaviour flags.
    ///
    /// If the current orientation becomes forbidden the item flips to the
    /// other one.
    pub fn with_behavior(mut self, behavior: ItemBehavior) -> Self {
        self.behavior = behavior;
        if !behavior.allows(self.orientation) {
            self.orientation = self.orientation.perpendicular();
        }
        self
    }

    /// Set the initial orientation, ignored if the behaviour forbids it.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.coerce_orientation(orientation);
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn behavior(&self) -> ItemBehavior {
        self.behavior
    }

    /// Replace the behaviour flags. Refused while the item is mid-drag.
    pub fn set_behavior(&mut self, behavior: ItemBehavior) -> bool {
        if self.dragging || !behavior.allows(self.orientation) {
            return false;
        }
        self.behavior = behavior;
        true
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change orientation; returns false mid-drag or if the behaviour forbids it.
    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        if self.dragging {
            return false;
        }
        self.coerce_orientation(orientation)
    }

    /// Turn the item to match its band, drag or not.
    pub(crate) fn coerce_orientation(&mut self, orientation: Orientation) -> bool {
        if !self.behavior.allows(orientation) {
            return false;
        }
        self.orientation = orientation;
        true
    }

    pub fn is_exclusive(&self) -> bool {
        self.behavior.contains(ItemBehavior::EXCLUSIVE)
    }

    pub fn is_locked(&self) -> bool {
        self.behavior.contains(ItemBehavior::LOCKED)
    }

    pub fn can_float(&self) -> bool {
        !self.behavior.contains(ItemBehavior::NEVER_FLOATING)
    }

    /// Whether the item is detached from any band (mid-drag or undocked).
    pub fn is_floating(&self) -> bool {
        self.floating
    }

    pub(crate) fn set_floating(&mut self, floating: bool) {
        self.floating = floating;
    }

    /// Whether a drag session is moving the item right now.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_visible(&self) -> bool {
        self.widget.is_visible()
    }

    /// Natural size in the current orientation.
    pub fn size_request(&self) -> Size<i32> {
        self.widget.size_request(self.orientation)
    }

    /// Natural size the item would have in `orientation`.
    pub fn size_request_in(&self, orientation: Orientation) -> Size<i32> {
        self.widget.size_request(orientation)
    }

    pub fn preferred_extent(&self) -> Option<Size<i32>> {
        self.widget.preferred_extent()
    }

    pub fn widget(&self) -> &dyn DockWidget {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> &mut dyn DockWidget {
        self.widget.as_mut()
    }
}

impl fmt::Debug for DockItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockItem")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("behavior", &self.behavior)
            .field("orientation", &self.orientation)
            .field("floating", &self.floating)
            .field("dragging", &self.dragging)
            .field("widget", &self.widget.debug_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Block;

    #[test]
    fn test_orientation_restrictions() {
        let mut item = DockItem::new("menu", Block::new(80, 20))
            .with_behavior(ItemBehavior::NEVER_VERTICAL);
        assert!(!item.set_orientation(Orientation::Vertical));
        assert_eq!(item.orientation(), Orientation::Horizontal);
        assert!(item.set_orientation(Orientation::Horizontal));
    }

    #[test]
    fn test_behavior_flips_forbidden_orientation() {
        let item = DockItem::new("rail", Block::new(20, 80))
            .with_behavior(ItemBehavior::NEVER_HORIZONTAL);
        assert_eq!(item.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_size_request_follows_orientation() {
        let mut item = DockItem::new("tools", Block::new(80, 20));
        assert_eq!(item.size_request(), Size::new(80, 20));
        item.set_orientation(Orientation::Vertical);
        assert_eq!(item.size_request(), Size::new(20, 80));
    }

    #[test]
    fn test_behavior_frozen_while_dragging() {
        let mut item = DockItem::new("tools", Block::new(80, 20));
        item.set_floating(true);
        item.set_dragging(true);
        assert!(!item.set_behavior(ItemBehavior::LOCKED));
        assert!(!item.set_orientation(Orientation::Vertical));
        assert_eq!(item.orientation(), Orientation::Horizontal);

        // Parked in the pool: still floating, but free to change
        item.set_dragging(false);
        assert!(item.set_behavior(ItemBehavior::LOCKED));
        assert!(item.is_locked());
        assert!(item.set_orientation(Orientation::Vertical));
    }

    #[test]
    fn test_coerce_ignores_drag() {
        let mut item = DockItem::new("tools", Block::new(80, 20));
        item.set_dragging(true);
        assert!(item.coerce_orientation(Orientation::Vertical));
        assert_eq!(item.size_request(), Size::new(20, 80));
    }
}
