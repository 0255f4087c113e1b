//! # Circle Queries
//!
//! Read-only filters over committed circles.
//!
//! - `filter_circles` - frame filter, then full containment in a search disk
//! - `CircleExtremes` - the outermost circles of one frame

use serde::{Deserialize, Serialize};

use super::geometry::Disk;
use super::record::{Circle, Position};
use super::Id;

/// Optional filters for a circle listing
///
/// The disk filter only applies when all three of `center_x`, `center_y`
/// and `radius` are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleQuery {
    pub frame_id: Option<Id>,
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub radius: Option<f64>,
}

impl CircleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only circles owned by `frame_id`
    pub fn in_frame(mut self, frame_id: Id) -> Self {
        self.frame_id = Some(frame_id);
        self
    }

    /// Only circles lying fully inside the given disk
    pub fn within(mut self, center_x: f64, center_y: f64, radius: f64) -> Self {
        self.center_x = Some(center_x);
        self.center_y = Some(center_y);
        self.radius = Some(radius);
        self
    }

    /// The search disk, when fully specified
    pub fn disk(&self) -> Option<Disk> {
        Some(Disk::new(
            Position::new(self.center_x?, self.center_y?),
            self.radius?,
        ))
    }

    /// True when `circle` passes every supplied filter
    pub fn matches(&self, circle: &Circle) -> bool {
        if self.frame_id.is_some_and(|id| id != circle.frame_id) {
            return false;
        }
        match self.disk() {
            Some(disk) => disk.encloses(circle.center(), circle.radius()),
            None => true,
        }
    }
}

/// Circles matching a query, in input order, with their count
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub circles: Vec<Circle>,
    pub total_count: usize,
}

/// Filter `circles`, keeping their relative order
pub fn filter_circles<I>(circles: I, query: &CircleQuery) -> QueryResult
where
    I: IntoIterator<Item = Circle>,
{
    let circles: Vec<Circle> = circles.into_iter().filter(|c| query.matches(c)).collect();
    let total_count = circles.len();

    QueryResult {
        circles,
        total_count,
    }
}

/// Outermost circle positions of a frame
///
/// Ties go to the first circle seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CircleExtremes {
    pub highest_circle: Option<Position>,
    pub lowest_circle: Option<Position>,
    pub leftmost_circle: Option<Position>,
    pub rightmost_circle: Option<Position>,
}

impl CircleExtremes {
    pub fn of<'a, I>(circles: I) -> Self
    where
        I: IntoIterator<Item = &'a Circle>,
    {
        let mut highest: Option<&Circle> = None;
        let mut lowest: Option<&Circle> = None;
        let mut leftmost: Option<&Circle> = None;
        let mut rightmost: Option<&Circle> = None;

        for circle in circles {
            if highest.map_or(true, |c| circle.y > c.y) {
                highest = Some(circle);
            }
            if lowest.map_or(true, |c| circle.y < c.y) {
                lowest = Some(circle);
            }
            if leftmost.map_or(true, |c| circle.x < c.x) {
                leftmost = Some(circle);
            }
            if rightmost.map_or(true, |c| circle.x > c.x) {
                rightmost = Some(circle);
            }
        }

        Self {
            highest_circle: highest.map(Circle::center),
            lowest_circle: lowest.map(Circle::center),
            leftmost_circle: leftmost.map(Circle::center),
            rightmost_circle: rightmost.map(Circle::center),
        }
    }
}
