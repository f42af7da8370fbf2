/// Axis-aligned integer bounding box with **inclusive** edges.
///
/// A box covering a single pixel at the origin is `(0, 0, 0, 0)`; width is
/// `x2 - x1 + 1`. Empty boxes are representable as `x2 == x1 - 1` (likewise
/// for the vertical axis) and survive round-trips through the arithmetic
/// helpers below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Area {
    /// Left edge, inclusive.
    pub x1: i32,
    /// Top edge, inclusive.
    pub y1: i32,
    /// Right edge, inclusive.
    pub x2: i32,
    /// Bottom edge, inclusive.
    pub y2: i32,
}

impl Area {
    /// Create an area from inclusive edges.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create an area from an origin and a size. Zero-sized input yields an
    /// empty area at that origin.
    pub fn from_size(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + w - 1,
            y2: y + h - 1,
        }
    }

    /// Width in pixels (0 for empty areas, never negative).
    pub fn width(self) -> i32 {
        (self.x2 - self.x1 + 1).max(0)
    }

    /// Height in pixels (0 for empty areas, never negative).
    pub fn height(self) -> i32 {
        (self.y2 - self.y1 + 1).max(0)
    }

    /// Return `true` when the area covers no pixels.
    pub fn is_empty(self) -> bool {
        self.x2 < self.x1 || self.y2 < self.y1
    }

    /// Grow (or shrink, for negative `d`) the area by `d` pixels on every
    /// side.
    pub fn inflate(&mut self, d: i32) {
        self.x1 -= d;
        self.y1 -= d;
        self.x2 += d;
        self.y2 += d;
    }

    /// Move the area by `(dx, dy)`.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
    }

    /// Intersection of two areas. The result may be empty; check with
    /// [`Area::is_empty`].
    pub fn intersect(self, other: Area) -> Area {
        Area {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        }
    }

    /// Return `true` when `other` lies fully inside `self`.
    pub fn contains(self, other: Area) -> bool {
        !other.is_empty()
            && self.x1 <= other.x1
            && self.y1 <= other.y1
            && self.x2 >= other.x2
            && self.y2 >= other.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_height_are_inclusive() {
        let a = Area::new(0, 0, 9, 4);
        assert_eq!(a.width(), 10);
        assert_eq!(a.height(), 5);
        assert!(!a.is_empty());
    }

    #[test]
    fn empty_areas_are_representable() {
        let a = Area::from_size(3, 7, 0, 0);
        assert!(a.is_empty());
        assert_eq!(a.width(), 0);
        assert_eq!(a.height(), 0);
        assert_eq!(a.x2, 2);
    }

    #[test]
    fn inflate_expands_every_side() {
        let mut a = Area::new(10, 10, 19, 19);
        a.inflate(4);
        assert_eq!(a, Area::new(6, 6, 23, 23));
        assert_eq!(a.width(), 18);
    }

    #[test]
    fn intersect_clamps_and_can_be_empty() {
        let a = Area::new(0, 0, 9, 9);
        let b = Area::new(5, 5, 14, 14);
        assert_eq!(a.intersect(b), Area::new(5, 5, 9, 9));

        let c = Area::new(20, 20, 29, 29);
        assert!(a.intersect(c).is_empty());
    }

    #[test]
    fn translate_moves_both_corners() {
        let mut a = Area::new(1, 2, 3, 4);
        a.translate(-1, 10);
        assert_eq!(a, Area::new(0, 12, 2, 14));
    }

    #[test]
    fn contains_rejects_partial_overlap() {
        let outer = Area::new(0, 0, 9, 9);
        assert!(outer.contains(Area::new(2, 2, 7, 7)));
        assert!(!outer.contains(Area::new(5, 5, 12, 12)));
        assert!(!outer.contains(Area::from_size(1, 1, 0, 0)));
    }
}
