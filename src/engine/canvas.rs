//! # Canvas Engine
//!
//! The main orchestrator.
//!
//! This struct wires together:
//! - Storage (RecordStore port)
//! - The frame and circle invariant checkers
//! - Configuration
//!
//! Every mutation opens a transaction, validates the candidate against the
//! records visible inside it, writes, and commits. Any failure drops the
//! transaction, which rolls it back.

use serde::Serialize;
use thiserror::Error;

use crate::adapters::storage::MemoryStore;
use crate::core::config::CanvasConfig;
use crate::core::invariants;
use crate::core::query::{self, CircleExtremes, CircleQuery, QueryResult};
use crate::core::{
    Circle, CircleGeometry, CircleParams, Frame, FrameGeometry, FrameParams, Id, ValidationErrors,
};
use crate::ports::{RecordStore, StoreError, Transaction};

/// Result type for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Kind of record an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordKind {
    Frame,
    Circle,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Frame => write!(f, "Frame"),
            RecordKind::Circle => write!(f, "Circle"),
        }
    }
}

/// Errors that can occur during canvas operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    /// The candidate broke one or more rules; nothing was written
    #[error("{0}")]
    Invalid(ValidationErrors),

    /// Aggregate creation failed; the frame and any nested circle were rolled back
    #[error("{0}")]
    RolledBack(ValidationErrors),

    /// The referenced record does not exist
    #[error("{kind} not found")]
    NotFound { kind: RecordKind, id: Id },

    /// Frames can only be deleted once they own no circles
    #[error("Cannot delete frame with associated circles")]
    FrameHasCircles { id: Id, circles: usize },

    /// Storage backend error
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CanvasError {
    /// The rule violations behind this error, if it is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            CanvasError::Invalid(errors) | CanvasError::RolledBack(errors) => Some(errors),
            _ => None,
        }
    }

    fn frame_not_found(id: Id) -> Self {
        CanvasError::NotFound {
            kind: RecordKind::Frame,
            id,
        }
    }

    fn circle_not_found(id: Id) -> Self {
        CanvasError::NotFound {
            kind: RecordKind::Circle,
            id,
        }
    }
}

/// A frame committed together with its optional first circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Created {
    pub frame: Frame,
    pub circle: Option<Circle>,
}

/// A frame with the positions of its outermost circles
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameDetails {
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(flatten)]
    pub extremes: CircleExtremes,
}

/// The main canvas engine
///
/// Orchestrates validation and storage with a unified API.
pub struct Canvas {
    /// Configuration
    config: CanvasConfig,

    /// Storage backend (RecordStore port)
    store: Box<dyn RecordStore>,
}

impl Canvas {
    /// Create a new canvas backed by a `MemoryStore`
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_store(config, Box::new(MemoryStore::new()))
    }

    /// Create with a custom store
    pub fn with_store(config: CanvasConfig, store: Box<dyn RecordStore>) -> Self {
        Self { config, store }
    }

    /// Get the configuration
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Read-only access to the underlying store
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    // ========================================================================
    // VALIDATION
    // ========================================================================

    /// Check a frame candidate against the committed frames
    ///
    /// `exclude` names the candidate's own record when re-checking it.
    pub fn validate_frame(
        &self,
        candidate: &FrameParams,
        exclude: Option<Id>,
    ) -> Result<FrameGeometry, ValidationErrors> {
        let others = self.store.other_frames(exclude);
        invariants::validate_frame(candidate, &others, &self.config)
    }

    /// Check a circle candidate against `frame_id` and its committed circles
    pub fn validate_circle(
        &self,
        candidate: &CircleParams,
        frame_id: Id,
        exclude: Option<Id>,
    ) -> Result<CircleGeometry, ValidationErrors> {
        let frame = self.store.frame(frame_id);
        let siblings = self.store.sibling_circles(frame_id, exclude);
        invariants::validate_circle(candidate, frame.as_ref(), &siblings, &self.config)
    }

    // ========================================================================
    // FRAME OPERATIONS
    // ========================================================================

    /// Create a frame and, optionally, its first circle as one unit
    ///
    /// Either both are committed or neither is. On failure the error carries
    /// the violations of whichever record was rejected.
    pub fn create_frame(
        &mut self,
        frame: &FrameParams,
        circle: Option<&CircleParams>,
    ) -> CanvasResult<Created> {
        let config = &self.config;
        let mut tx = Transaction::begin(&mut *self.store)?;

        let others = tx.other_frames(None);
        let geometry = invariants::validate_frame(frame, &others, config).map_err(|errors| {
            log::warn!("frame rejected, rolling back: {}", errors);
            CanvasError::RolledBack(errors)
        })?;
        let created = tx.insert_frame(geometry)?;

        let circle = match circle {
            None => None,
            Some(params) => {
                let geometry = invariants::validate_circle(params, Some(&created), &[], config)
                    .map_err(|errors| {
                        log::warn!("nested circle rejected, rolling back frame: {}", errors);
                        CanvasError::RolledBack(errors)
                    })?;
                Some(tx.insert_circle(created.id, geometry)?)
            }
        };

        let frame = tx
            .frame(created.id)
            .ok_or_else(|| CanvasError::frame_not_found(created.id))?;
        tx.commit()?;

        log::info!(
            "created frame {} with {} circle(s)",
            frame.id,
            frame.circles_count
        );
        Ok(Created { frame, circle })
    }

    /// Delete a frame that owns no circles
    pub fn delete_frame(&mut self, id: Id) -> CanvasResult<Frame> {
        let mut tx = Transaction::begin(&mut *self.store)?;

        let frame = tx.frame(id).ok_or_else(|| CanvasError::frame_not_found(id))?;
        if tx.has_circles(id) {
            log::warn!("refusing to delete frame {} with {} circles", id, frame.circles_count);
            return Err(CanvasError::FrameHasCircles {
                id,
                circles: frame.circles_count,
            });
        }

        tx.remove_frame(id);
        tx.commit()?;

        log::info!("deleted frame {}", id);
        Ok(frame)
    }

    /// Get a frame by ID
    pub fn frame(&self, id: Id) -> Option<Frame> {
        self.store.frame(id)
    }

    /// A frame with the positions of its highest, lowest, leftmost and
    /// rightmost circles
    pub fn show_frame(&self, id: Id) -> CanvasResult<FrameDetails> {
        let frame = self
            .store
            .frame(id)
            .ok_or_else(|| CanvasError::frame_not_found(id))?;
        let extremes = CircleExtremes::of(self.store.circles_of(id));

        Ok(FrameDetails { frame, extremes })
    }

    // ========================================================================
    // CIRCLE OPERATIONS
    // ========================================================================

    /// Create a circle inside an existing frame
    pub fn create_circle(&mut self, frame_id: Id, params: &CircleParams) -> CanvasResult<Circle> {
        let config = &self.config;
        let mut tx = Transaction::begin(&mut *self.store)?;

        let frame = tx
            .frame(frame_id)
            .ok_or_else(|| CanvasError::frame_not_found(frame_id))?;
        let siblings = tx.sibling_circles(frame_id, None);
        let geometry = invariants::validate_circle(params, Some(&frame), &siblings, config)
            .map_err(|errors| {
                log::warn!("circle rejected in frame {}: {}", frame_id, errors);
                CanvasError::Invalid(errors)
            })?;

        let circle = tx.insert_circle(frame_id, geometry)?;
        tx.commit()?;

        log::info!("created circle {} in frame {}", circle.id, frame_id);
        Ok(circle)
    }

    /// Move or resize a circle
    ///
    /// Fields absent from `params` keep their committed values. The result is
    /// re-validated against the frame and every other circle in it.
    pub fn update_circle(&mut self, id: Id, params: &CircleParams) -> CanvasResult<Circle> {
        let config = &self.config;
        let mut tx = Transaction::begin(&mut *self.store)?;

        let existing = tx.circle(id).ok_or_else(|| CanvasError::circle_not_found(id))?;
        let frame = tx.frame(existing.frame_id);
        let siblings = tx.sibling_circles(existing.frame_id, Some(id));
        let candidate = params.merged_over(&existing);

        let geometry = invariants::validate_circle(&candidate, frame.as_ref(), &siblings, config)
            .map_err(|errors| {
                log::warn!("update of circle {} rejected: {}", id, errors);
                CanvasError::Invalid(errors)
            })?;

        let circle = tx.update_circle(id, geometry)?;
        tx.commit()?;

        log::info!("updated circle {}", id);
        Ok(circle)
    }

    /// Delete a circle
    pub fn delete_circle(&mut self, id: Id) -> CanvasResult<Circle> {
        let mut tx = Transaction::begin(&mut *self.store)?;

        let circle = tx
            .remove_circle(id)
            .ok_or_else(|| CanvasError::circle_not_found(id))?;
        tx.commit()?;

        log::info!("deleted circle {} from frame {}", id, circle.frame_id);
        Ok(circle)
    }

    /// Get a circle by ID
    pub fn circle(&self, id: Id) -> Option<Circle> {
        self.store.circle(id)
    }

    // ========================================================================
    // QUERY OPERATIONS
    // ========================================================================

    /// Circles matching every supplied filter, in store order
    pub fn query_circles(&self, query: &CircleQuery) -> QueryResult {
        let circles: Box<dyn Iterator<Item = &Circle> + '_> = match query.frame_id {
            Some(frame_id) => self.store.circles_of(frame_id),
            None => self.store.circles(),
        };

        let result = query::filter_circles(circles.copied(), query);
        log::debug!("circle query matched {} circles", result.total_count);
        result
    }

    // ========================================================================
    // STATS
    // ========================================================================

    /// Number of committed frames
    pub fn frame_count(&self) -> usize {
        self.store.frame_count()
    }

    /// Number of committed circles
    pub fn circle_count(&self) -> usize {
        self.store.circle_count()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}
