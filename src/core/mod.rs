//! # Core Domain
//!
//! Pure math and validation, no I/O.
//!
//! This module contains the fundamental types and operations:
//! - `Frame`, `Circle` - committed records
//! - `FrameParams`, `CircleParams` - raw candidate attributes
//! - `geometry` - distances, edges, separation, containment, collision
//! - `invariants` - the frame and circle checkers
//! - `query` - proximity filtering and frame extremes
//!
//! ## Design Principles
//!
//! - All functions are pure (deterministic, no side effects)
//! - Peers are passed in; nothing here reads the store
//! - Fully testable in isolation

mod id;
mod record;
pub mod attr;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod invariants;
pub mod query;

// Re-exports
pub use id::Id;
pub use record::{Circle, CircleGeometry, Frame, FrameGeometry, Position};
pub use attr::{AttrValue, CircleParams, FrameParams};
pub use errors::{Field, ValidationError, ValidationErrors, Violation};
