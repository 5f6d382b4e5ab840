//! Geometric primitives for layout analysis.
//!
//! Coordinates follow the page space of the upstream extractor: the origin is
//! the top-left corner, x grows rightward and y grows downward.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box `(x0, y0, x1, y1)`.
///
/// Serialized as a 4-element array, the shape text extractors emit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

impl BBox {
    /// Create a bounding box from its two corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use paraflow::geometry::BBox;
    ///
    /// let b = BBox::new(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(b.width(), 100.0);
    /// assert_eq!(b.height(), 50.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// True when all four coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }

    /// Smallest box containing both boxes.
    ///
    /// # Examples
    ///
    /// ```
    /// use paraflow::geometry::BBox;
    ///
    /// let u = BBox::new(0.0, 0.0, 50.0, 50.0).union(&BBox::new(25.0, 25.0, 75.0, 75.0));
    /// assert_eq!(u, BBox::new(0.0, 0.0, 75.0, 75.0));
    /// ```
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Half-open rectangle intersection: boxes that merely touch do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use paraflow::geometry::BBox;
    ///
    /// let a = BBox::new(0.0, 0.0, 100.0, 100.0);
    /// assert!(a.intersects(&BBox::new(50.0, 50.0, 150.0, 150.0)));
    /// assert!(!a.intersects(&BBox::new(100.0, 0.0, 200.0, 100.0)));
    /// ```
    pub fn intersects(&self, other: &BBox) -> bool {
        self.x_overlaps(other) && self.y_overlaps(other)
    }

    /// Strict overlap of the horizontal extents.
    pub fn x_overlaps(&self, other: &BBox) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1
    }

    /// Strict overlap of the vertical extents.
    pub fn y_overlaps(&self, other: &BBox) -> bool {
        self.y0 < other.y1 && other.y0 < self.y1
    }

    /// This box with its x-range widened to cover `other`'s x-range.
    ///
    /// The vertical extent is left untouched.
    pub fn union_x(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            x1: self.x1.max(other.x1),
            ..*self
        }
    }
}
