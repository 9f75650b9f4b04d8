//! Planar coordinate type.
//!
//! City-map files position intersections on an integer grid, so `Point`
//! stores `i32` coordinates exactly.  Distances are only used for
//! nearest-intersection snapping, where squared Euclidean distance in `i64`
//! avoids both rounding and overflow.

/// An integer planar coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance in `i64`.  Exact for coordinate spans up
    /// to ±2³¹ per axis, far beyond any city map.
    #[inline]
    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
