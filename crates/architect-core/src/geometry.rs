use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in parent-content coordinates.
///
/// Used both for `frameInScopeContent` (an artifact's frame within its
/// parent's content area) and `contentFrame` (the inner area where an
/// artifact's own children are laid out).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn surface(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// A degenerate rectangle collapsed to this rectangle's center, used for
    /// hidden/collapsed descendants and the childless fallback.
    pub fn collapsed_to_center(&self) -> Rect {
        let (cx, cy) = self.center();
        Rect::new(cx, cy, 0.0, 0.0)
    }

    /// Inset on all sides by `amount`. Clamps to a zero-size rectangle rather
    /// than going negative.
    pub fn inset(&self, amount: f64) -> Rect {
        let width = (self.width - 2.0 * amount).max(0.0);
        let height = (self.height - 2.0 * amount).max(0.0);
        Rect::new(self.x + amount, self.y + amount, width, height)
    }

    /// Whether this rectangle fits inside `other`, inflated by `padding` on
    /// every side.
    pub fn fits_inside_inflated(&self, other: &Rect, padding: f64) -> bool {
        let inflated = Rect::new(
            other.x - padding,
            other.y - padding,
            other.width + 2.0 * padding,
            other.height + 2.0 * padding,
        );
        self.x >= inflated.x
            && self.y >= inflated.y
            && self.x + self.width <= inflated.x + inflated.width
            && self.y + self.height <= inflated.y + inflated.height
    }

    /// Whether this rectangle overlaps `other` (strict interior overlap; two
    /// rectangles that merely touch at an edge do not overlap).
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn meets_minimum(&self, min_width: f64, min_height: f64) -> bool {
        self.width >= min_width && self.height >= min_height
    }
}
