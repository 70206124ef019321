//! Geometry types for image-space regions and page-space rectangles.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in image-pixel space (top-left origin).
///
/// Serialized as `[x_min, y_min, x_max, y_max]`, the layout model's native
/// box format.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    /// Left edge
    pub x_min: f64,
    /// Top edge
    pub y_min: f64,
    /// Right edge
    pub x_max: f64,
    /// Bottom edge
    pub y_max: f64,
}

impl BBox {
    /// Create a new box.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Copy of this box with every coordinate rounded to 2 decimals.
    pub fn rounded(&self) -> Self {
        Self::new(
            round2(self.x_min),
            round2(self.y_min),
            round2(self.x_max),
            round2(self.y_max),
        )
    }

    /// Width, clamped at zero for inverted boxes.
    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min).max(0.0)
    }

    /// Height, clamped at zero for inverted boxes.
    pub fn height(&self) -> f64 {
        (self.y_max - self.y_min).max(0.0)
    }

    /// Area, zero for degenerate or inverted boxes.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check if two boxes overlap.
    ///
    /// Boxes that only touch along an edge or at a corner count as
    /// overlapping: they are disjoint only when one lies strictly left of,
    /// right of, above or below the other.
    pub fn overlaps(&self, other: &BBox) -> bool {
        !(self.x_max < other.x_min
            || self.x_min > other.x_max
            || self.y_max < other.y_min
            || self.y_min > other.y_max)
    }

    /// Area of the intersection of two boxes (zero if they do not intersect).
    pub fn intersection_area(&self, other: &BBox) -> f64 {
        let x_overlap = (self.x_max.min(other.x_max) - self.x_min.max(other.x_min)).max(0.0);
        let y_overlap = (self.y_max.min(other.y_max) - self.y_min.max(other.y_min)).max(0.0);
        x_overlap * y_overlap
    }

    /// Share of each box covered by the intersection, in percent (0-100).
    ///
    /// Degenerate boxes report 0.
    pub fn coverage(&self, other: &BBox) -> (f64, f64) {
        let intersection = self.intersection_area(other);
        let percent = |area: f64| {
            if area > 0.0 {
                intersection / area * 100.0
            } else {
                0.0
            }
        };
        (percent(self.area()), percent(other.area()))
    }

    /// Grow the box by `offset` on every side and truncate to device pixels.
    ///
    /// Truncation is toward zero, matching how the renderer's integer device
    /// rectangles are filled.
    pub fn to_device_rect(&self, offset: i32) -> DeviceRect {
        let offset = f64::from(offset);
        DeviceRect {
            left: (self.x_min - offset) as i32,
            top: (self.y_min - offset) as i32,
            right: (self.x_max + offset) as i32,
            bottom: (self.y_max + offset) as i32,
        }
    }
}

impl From<[f64; 4]> for BBox {
    fn from(b: [f64; 4]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }
}

impl From<BBox> for [f64; 4] {
    fn from(b: BBox) -> Self {
        [b.x_min, b.y_min, b.x_max, b.y_max]
    }
}

/// Integer rectangle in rendered-image (device) space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DeviceRect {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge
    pub right: i32,
    /// Bottom edge
    pub bottom: i32,
}

impl DeviceRect {
    /// Create a new device rectangle.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Rectangle in page space (PDF user units, y axis pointing up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageRect {
    /// Left edge
    pub left: f64,
    /// Bottom edge
    pub bottom: f64,
    /// Right edge
    pub right: f64,
    /// Top edge
    pub top: f64,
}

impl PageRect {
    /// Create a new page rectangle.
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Coordinates as decimal strings in `(left, bottom, right, top)` order.
    pub fn to_strings(&self) -> [String; 4] {
        [
            format_coordinate(self.left),
            format_coordinate(self.bottom),
            format_coordinate(self.right),
            format_coordinate(self.top),
        ]
    }
}

/// Format a coordinate as a decimal string.
///
/// Integral values keep a trailing `.0` (`100.0`, not `100`), which is what
/// the tagging engine's templates have always contained.
pub fn format_coordinate(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{text}.0")
    } else {
        text
    }
}

/// Round to 2 decimals through the exact decimal expansion, so exact ties
/// go to even (`10.125` -> `10.12`).
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
