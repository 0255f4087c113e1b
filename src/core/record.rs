//! # Records
//!
//! Committed frames and circles, plus the validated geometry a checker
//! hands to the record store.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::Id;

/// A point in the plane
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Validated frame attributes, ready to persist
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FrameGeometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn edges(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.width, self.height)
    }
}

/// Validated circle attributes, ready to persist
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleGeometry {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
}

impl CircleGeometry {
    pub fn new(x: f64, y: f64, diameter: f64) -> Self {
        Self { x, y, diameter }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// A committed frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub id: Id,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Number of circles owned, maintained by the record store
    pub circles_count: usize,
}

impl Frame {
    /// Create a frame record with no circles
    pub fn new(id: Id, geometry: FrameGeometry) -> Self {
        Self {
            id,
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            circles_count: 0,
        }
    }

    pub fn geometry(&self) -> FrameGeometry {
        FrameGeometry::new(self.x, self.y, self.width, self.height)
    }

    pub fn edges(&self) -> Rect {
        self.geometry().edges()
    }

    pub fn min_x(&self) -> f64 {
        self.edges().min_x
    }

    pub fn max_x(&self) -> f64 {
        self.edges().max_x
    }

    pub fn min_y(&self) -> f64 {
        self.edges().min_y
    }

    pub fn max_y(&self) -> f64 {
        self.edges().max_y
    }
}

/// A committed circle
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Circle {
    pub id: Id,
    pub frame_id: Id,
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
}

impl Circle {
    pub fn new(id: Id, frame_id: Id, geometry: CircleGeometry) -> Self {
        Self {
            id,
            frame_id,
            x: geometry.x,
            y: geometry.y,
            diameter: geometry.diameter,
        }
    }

    pub fn geometry(&self) -> CircleGeometry {
        CircleGeometry::new(self.x, self.y, self.diameter)
    }

    pub fn center(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Distance between this circle's center and another's
    pub fn distance_to(&self, other: &Circle) -> f64 {
        self.center().distance_to(other.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_edges() {
        let frame = Frame::new(Id::new(1), FrameGeometry::new(10.0, 20.0, 6.0, 8.0));

        assert_eq!(frame.min_x(), 7.0);
        assert_eq!(frame.max_x(), 13.0);
        assert_eq!(frame.min_y(), 16.0);
        assert_eq!(frame.max_y(), 24.0);
        assert_eq!(frame.circles_count, 0);
    }

    #[test]
    fn test_circle_radius_and_distance() {
        let a = Circle::new(Id::new(1), Id::new(1), CircleGeometry::new(0.0, 0.0, 6.0));
        let b = Circle::new(Id::new(2), Id::new(1), CircleGeometry::new(3.0, 4.0, 5.5));

        assert_eq!(a.radius(), 3.0);
        assert_eq!(b.radius(), 2.75);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_frame_serializes_counter() {
        let mut frame = Frame::new(Id::new(3), FrameGeometry::new(10.0, 10.0, 5.0, 5.0));
        frame.circles_count = 2;

        let value = serde_json::to_value(frame).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["circles_count"], 2);
        assert_eq!(value["width"], 5.0);
    }
}
