//! # Invariant Checkers
//!
//! Decide whether a candidate frame or circle may be committed next to the
//! records already in the store.
//!
//! Both checkers are pure: the caller reads the peers (other frames, or the
//! sibling circles of the owning frame) and passes them in, already excluding
//! the candidate's own record when it is an update. Every rule runs; a
//! candidate that is both outside its frame and colliding reports both.

use super::attr::{CircleParams, FrameParams};
use super::config::CanvasConfig;
use super::errors::{Field, ValidationErrors, Violation};
use super::geometry;
use super::record::{Circle, CircleGeometry, Frame, FrameGeometry};

fn require_positive(field: Field, value: Option<f64>, errors: &mut ValidationErrors) {
    if let Some(v) = value {
        if v <= 0.0 {
            errors.add_field(field, Violation::NotPositive);
        }
    }
}

fn record_conflict(errors: &mut ValidationErrors, violation: Violation, config: &CanvasConfig) {
    if config.dedupe_conflicts {
        errors.add_base_once(violation);
    } else {
        errors.add_base(violation);
    }
}

/// Check a candidate frame against every other committed frame
///
/// Frames may share an edge but never interior area. The overlap rule only
/// runs once all four attributes parsed.
pub fn validate_frame(
    candidate: &FrameParams,
    others: &[Frame],
    config: &CanvasConfig,
) -> Result<FrameGeometry, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let parsed = candidate.parse(&mut errors);

    if config.require_positive_dimensions {
        require_positive(Field::Width, parsed.width, &mut errors);
        require_positive(Field::Height, parsed.height, &mut errors);
    }

    let Some(geometry) = parsed.geometry() else {
        return Err(errors);
    };

    let edges = geometry.edges();
    let mut conflicts = 0;
    for other in others {
        if !edges.is_separated_from(&other.edges()) {
            conflicts += 1;
            record_conflict(&mut errors, Violation::FrameOverlap, config);
        }
    }

    log::debug!(
        "frame candidate checked against {} frames: {} conflicts, {} errors",
        others.len(),
        conflicts,
        errors.len()
    );

    errors.into_result(geometry)
}

/// Check a candidate circle against its frame and the frame's other circles
///
/// `frame` is `None` when the owning frame does not exist. Containment and
/// collision are skipped (not passed) while the frame or any numeric
/// attribute is missing; presence errors already reject the candidate then.
pub fn validate_circle(
    candidate: &CircleParams,
    frame: Option<&Frame>,
    siblings: &[Circle],
    config: &CanvasConfig,
) -> Result<CircleGeometry, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let parsed = candidate.parse(&mut errors);

    if config.require_positive_dimensions {
        require_positive(Field::Diameter, parsed.diameter, &mut errors);
    }

    let Some(frame) = frame else {
        errors.add_field(Field::Frame, Violation::Missing);
        return Err(errors);
    };

    let Some(geometry) = parsed.geometry() else {
        return Err(errors);
    };

    let center = geometry.center();
    let radius = geometry.radius();

    if !frame.edges().contains_disk(center, radius) {
        errors.add_base(Violation::OutsideFrame);
    }

    let mut collisions = 0;
    for other in siblings {
        if geometry::collides(center, radius, other.center(), other.radius()) {
            collisions += 1;
            record_conflict(&mut errors, Violation::CircleCollision, config);
        }
    }

    log::debug!(
        "circle candidate in frame {} checked against {} siblings: {} collisions, {} errors",
        frame.id,
        siblings.len(),
        collisions,
        errors.len()
    );

    errors.into_result(geometry)
}
