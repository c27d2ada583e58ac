use serde::{Deserialize, Serialize};

/// A screen-space rectangle. Coordinates grow rightward and downward.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Rect { Rect { x, y, w, h } }

    /// Shrinks the rectangle by per-side insets.
    ///
    /// The result is not clamped: insets larger than the rectangle produce a
    /// zero- or negative-sized area, which callers treat as a degenerate
    /// layout area rather than an error.
    pub fn inset(self, left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        Rect {
            x: self.x + left,
            y: self.y + top,
            w: self.w - left - right,
            h: self.h - top - bottom,
        }
    }

    pub fn is_degenerate(self) -> bool { self.w <= 0.0 || self.h <= 0.0 }

    pub fn max_x(self) -> f64 { self.x + self.w }

    pub fn max_y(self) -> f64 { self.y + self.h }
}

pub trait Round {
    /// Rounds to integral pixel edges. Edges are rounded rather than
    /// extents so that adjacent rectangles stay adjacent.
    fn round(self) -> Self;
}

impl Round for Rect {
    fn round(self) -> Rect {
        let x = self.x.round();
        let y = self.y.round();
        Rect {
            x,
            y,
            w: self.max_x().round() - x,
            h: self.max_y().round() - y,
        }
    }
}
