//! Plain geometry value types shared across the engine.
//!
//! UI space has its origin at the bottom-left corner with `y` growing upwards.

use crate::math::Vec2;
use std::ops::Mul;

/// Axis-aligned rectangle, `(x, y)` being its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl Rect<f32> {
    /// Build a rectangle from its bottom-left and top-right corners.
    pub fn from_corners(bottom_left: Vec2, top_right: Vec2) -> Self {
        Self {
            x: bottom_left.x,
            y: bottom_left.y,
            width: top_right.x - bottom_left.x,
            height: top_right.y - bottom_left.y,
        }
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Inclusive containment test on all four edges.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    pub fn cast<U: From<T>>(self) -> Size<U> {
        Size {
            width: U::from(self.width),
            height: U::from(self.height),
        }
    }
}

impl<T: Mul + Copy> Mul<T> for Size<T> {
    type Output = Size<<T as Mul>::Output>;

    fn mul(self, rhs: T) -> Self::Output {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

impl From<Size<f32>> for Vec2 {
    fn from(size: Size<f32>) -> Self {
        Vec2::new(size.width, size.height)
    }
}

impl From<Vec2> for Size<f32> {
    fn from(v: Vec2) -> Self {
        Size::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::from_corners(Vec2::new(10.0, 10.0), Vec2::new(20.0, 30.0));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(20.0, 30.0)));
        assert!(rect.contains(Vec2::new(15.0, 25.0)));
        assert!(!rect.contains(Vec2::new(9.9, 15.0)));
        assert!(!rect.contains(Vec2::new(15.0, 30.1)));
    }

    #[test]
    fn test_size_vec2_conversion() {
        let size = Size::new(800.0, 600.0);
        let v: Vec2 = size.into();
        assert_eq!(v, Vec2::new(800.0, 600.0));
        assert_eq!(Size::from(v), size);
    }
}
