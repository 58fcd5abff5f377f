use std::ops::{Add, Sub};

/// Axis along which a band lays out its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Items run left to right.
    #[default]
    Horizontal,
    /// Items run top to bottom.
    Vertical,
}

impl Orientation {
    /// Get the perpendicular orientation.
    pub fn perpendicular(&self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T: Copy + Add<Output = T> + Sub<Output = T> + PartialOrd> Rect<T> {
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Leading edge along `axis`.
    pub fn start(&self, axis: Orientation) -> T {
        match axis {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Size along `axis`.
    pub fn extent(&self, axis: Orientation) -> T {
        match axis {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Trailing edge along `axis` (exclusive).
    pub fn end(&self, axis: Orientation) -> T {
        self.start(axis) + self.extent(axis)
    }

    /// Build a rect from main-axis and cross-axis spans.
    pub fn from_spans(axis: Orientation, start: T, extent: T, cross_start: T, cross_extent: T) -> Self {
        match axis {
            Orientation::Horizontal => Rect::new(start, cross_start, extent, cross_extent),
            Orientation::Vertical => Rect::new(cross_start, start, cross_extent, extent),
        }
    }

    pub fn contains(&self, point: Pos<T>) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T: Copy> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    pub fn cast<U: From<T>>(self) -> Size<U> {
        Size {
            width: U::from(self.width),
            height: U::from(self.height),
        }
    }

    /// Size along `axis`.
    pub fn main(&self, axis: Orientation) -> T {
        match axis {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Size across `axis`.
    pub fn cross(&self, axis: Orientation) -> T {
        self.main(axis.perpendicular())
    }

    /// Swap width and height.
    pub fn transposed(self) -> Self {
        Size {
            width: self.height,
            height: self.width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos<T> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> Pos<T> {
    pub fn new(x: T, y: T) -> Self {
        Pos { x, y }
    }

    /// Coordinate along `axis`.
    pub fn main(&self, axis: Orientation) -> T {
        match axis {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_axis_accessors() {
        let rect = Rect::new(10, 20, 300, 40);
        assert_eq!(rect.start(Orientation::Horizontal), 10);
        assert_eq!(rect.end(Orientation::Horizontal), 310);
        assert_eq!(rect.start(Orientation::Vertical), 20);
        assert_eq!(rect.extent(Orientation::Vertical), 40);
    }

    #[test]
    fn test_rect_from_spans() {
        let h = Rect::from_spans(Orientation::Horizontal, 5, 50, 0, 24);
        assert_eq!(h, Rect::new(5, 0, 50, 24));
        let v = Rect::from_spans(Orientation::Vertical, 5, 50, 0, 24);
        assert_eq!(v, Rect::new(0, 5, 24, 50));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains(Pos::new(0, 0)));
        assert!(rect.contains(Pos::new(9, 9)));
        assert!(!rect.contains(Pos::new(10, 5)));
    }

    #[test]
    fn test_size_main_and_cross() {
        let size = Size::new(80, 24);
        assert_eq!(size.main(Orientation::Horizontal), 80);
        assert_eq!(size.cross(Orientation::Horizontal), 24);
        assert_eq!(size.transposed(), Size::new(24, 80));
    }
}
