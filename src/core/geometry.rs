//! # Geometry
//!
//! Pure numeric predicates behind every invariant: distances, rectangle
//! edges, separation, containment and collision.
//!
//! All comparisons are plain IEEE-754 double comparisons. Boundaries are
//! closed: touching edges are valid, only strict overlap is a violation.

use super::record::Position;

/// Euclidean distance between two centers
///
/// A missing center yields `0.0` instead of failing. Only partially parsed
/// candidates hit that path, and their presence errors reject them anyway.
pub fn distance(a: Option<Position>, b: Option<Position>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => a.distance_to(b),
        _ => 0.0,
    }
}

/// Radius for a diameter, `0.0` when the diameter is missing
pub fn radius(diameter: Option<f64>) -> f64 {
    diameter.map_or(0.0, |d| d / 2.0)
}

/// Axis-aligned rectangle given by its edges
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Rect {
    /// Rectangle centered on `(x, y)` with the given extent
    ///
    /// Non-positive extents are not rejected here; they produce a degenerate
    /// or inverted rectangle.
    pub fn from_center(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: x - width / 2.0,
            max_x: x + width / 2.0,
            min_y: y - height / 2.0,
            max_y: y + height / 2.0,
        }
    }

    /// True when the two rectangles share no interior area
    ///
    /// Sharing an edge exactly counts as separated.
    pub fn is_separated_from(&self, other: &Rect) -> bool {
        self.max_x <= other.min_x
            || self.min_x >= other.max_x
            || self.max_y <= other.min_y
            || self.min_y >= other.max_y
    }

    /// True when the disk at `center` with `radius` lies inside, edges inclusive
    pub fn contains_disk(&self, center: Position, radius: f64) -> bool {
        center.x - radius >= self.min_x
            && center.x + radius <= self.max_x
            && center.y - radius >= self.min_y
            && center.y + radius <= self.max_y
    }
}

/// Edges of the rectangle described by a center and extent
///
/// Returns `(min_x, max_x, min_y, max_y)`.
pub fn rectangle_edges(x: f64, y: f64, width: f64, height: f64) -> (f64, f64, f64, f64) {
    let rect = Rect::from_center(x, y, width, height);
    (rect.min_x, rect.max_x, rect.min_y, rect.max_y)
}

/// True when two disks overlap
///
/// Touching disks (distance exactly equal to the sum of radii) do not collide.
pub fn collides(a: Position, a_radius: f64, b: Position, b_radius: f64) -> bool {
    a.distance_to(b) < a_radius + b_radius
}

/// A circular search area
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disk {
    pub center: Position,
    pub radius: f64,
}

impl Disk {
    pub fn new(center: Position, radius: f64) -> Self {
        Self { center, radius }
    }

    /// True when the disk at `center` with `radius` lies fully inside this one
    ///
    /// Partial overlap does not count.
    pub fn encloses(&self, center: Position, radius: f64) -> bool {
        self.center.distance_to(center) + radius <= self.radius
    }
}
