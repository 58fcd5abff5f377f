//! Keyboard reordering of dock items.

use bitflags::bitflags;
use dockband_core::geometry::Orientation;
use tracing::trace;

use crate::band::Band;
use crate::types::ItemId;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// No modifiers pressed.
        const NONE = 0;
        /// Shift key is pressed.
        const SHIFT = 1 << 0;
        /// Control key is pressed (Cmd on macOS).
        const CTRL = 1 << 1;
        /// Alt key is pressed (Option on macOS).
        const ALT = 1 << 2;
    }
}

impl Modifiers {
    /// Create modifiers from individual key states.
    pub fn from_keys(shift: bool, ctrl: bool, alt: bool) -> Self {
        let mut mods = Modifiers::NONE;
        if shift {
            mods |= Modifiers::SHIFT;
        }
        if ctrl {
            mods |= Modifiers::CTRL;
        }
        if alt {
            mods |= Modifiers::ALT;
        }
        mods
    }
}

/// Arrow key pressed on a focused dock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyDirection {
    Left,
    Right,
    Up,
    Down,
}

impl KeyDirection {
    /// Axis the key moves along.
    pub fn axis(&self) -> Orientation {
        match self {
            KeyDirection::Left | KeyDirection::Right => Orientation::Horizontal,
            KeyDirection::Up | KeyDirection::Down => Orientation::Vertical,
        }
    }

    /// -1 toward the origin, +1 away from it.
    pub fn step(&self) -> isize {
        match self {
            KeyDirection::Left | KeyDirection::Up => -1,
            KeyDirection::Right | KeyDirection::Down => 1,
        }
    }
}

impl Band {
    /// Move `item` one position along the band with Ctrl+arrow.
    ///
    /// Returns false (unhandled) without CTRL, for keys across the band
    /// axis, or when the item is already at that end of the band.
    pub fn handle_key(&mut self, item: ItemId, direction: KeyDirection, modifiers: Modifiers) -> bool {
        if !modifiers.contains(Modifiers::CTRL) || direction.axis() != self.orientation {
            return false;
        }
        let Some(index) = self.index_of(item) else {
            return false;
        };
        let last = self.len().saturating_sub(1);
        let target = index.saturating_add_signed(direction.step()).min(last);
        if target == index {
            trace!(band = %self.id, item = %item, ?direction, "already at band edge");
            return false;
        }
        self.reorder(item, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::band_with;

    #[test]
    fn test_modifiers_from_keys() {
        let mods = Modifiers::from_keys(true, true, false);
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::ALT));
    }

    #[test]
    fn test_ctrl_arrow_moves_item() {
        let (mut band, ids) = band_with(&[10, 10, 10], &[0, 0, 0]);
        assert!(band.handle_key(ids[0], KeyDirection::Right, Modifiers::CTRL));
        assert_eq!(band.index_of(ids[0]), Some(1));
        assert!(band.handle_key(ids[0], KeyDirection::Left, Modifiers::CTRL));
        assert_eq!(band.index_of(ids[0]), Some(0));
    }

    #[test]
    fn test_edge_is_unhandled() {
        let (mut band, ids) = band_with(&[10, 10, 10], &[0, 0, 0]);
        assert!(!band.handle_key(ids[0], KeyDirection::Left, Modifiers::CTRL));
        assert!(!band.handle_key(ids[2], KeyDirection::Right, Modifiers::CTRL));
        assert_eq!(band.index_of(ids[2]), Some(2));
    }

    #[test]
    fn test_requires_ctrl_and_band_axis() {
        let (mut band, ids) = band_with(&[10, 10], &[0, 0]);
        assert!(!band.handle_key(ids[0], KeyDirection::Right, Modifiers::NONE));
        assert!(!band.handle_key(ids[0], KeyDirection::Down, Modifiers::CTRL));
        assert_eq!(band.index_of(ids[0]), Some(0));
    }

    #[test]
    fn test_vertical_band_uses_up_down() {
        let (mut band, ids) = band_with(&[10, 10], &[0, 0]);
        band.set_orientation(Orientation::Vertical);
        assert!(band.handle_key(ids[0], KeyDirection::Down, Modifiers::CTRL | Modifiers::SHIFT));
        assert_eq!(band.index_of(ids[0]), Some(1));
    }
}
