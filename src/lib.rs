//! # Frame Circles
//!
//! A spatial constraint engine for rectangular frames and the circles nested
//! inside them.
//!
//! Every mutation is checked against the committed records before it reaches
//! the store:
//!
//! - **Frames never overlap** - sharing an edge is fine, sharing area is not
//! - **Circles stay inside their frame** - edges may be flush
//! - **Circles never collide** - within one frame, touching is fine
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      FRAME CIRCLES                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  CORE (pure math, no I/O)                                   │
//! │    Frame, Circle, geometry, invariants, query               │
//! │                                                              │
//! │  PORTS (trait contracts)                                     │
//! │    RecordStore, Transaction                                 │
//! │                                                              │
//! │  ADAPTERS (swappable implementations)                       │
//! │    Storage: Memory                                          │
//! │    Scripts: JSON command batches                            │
//! │                                                              │
//! │  ENGINE (orchestration)                                      │
//! │    Canvas - the main entry point                            │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use frame_circles::{Canvas, CircleParams, CircleQuery, FrameParams};
//!
//! let mut canvas = Canvas::default();
//!
//! // A frame and its first circle, committed together
//! let created = canvas
//!     .create_frame(
//!         &FrameParams::new(10.0, 10.0, 10.0, 10.0),
//!         Some(&CircleParams::new(8.0, 8.0, 2.0)),
//!     )
//!     .unwrap();
//!
//! // Overlapping circles are rejected
//! let frame_id = created.frame.id;
//! assert!(canvas.create_circle(frame_id, &CircleParams::new(8.5, 8.0, 2.0)).is_err());
//!
//! // Circles fully inside a search disk
//! let found = canvas.query_circles(&CircleQuery::new().within(10.0, 10.0, 5.0));
//! assert_eq!(found.total_count, 1);
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Core domain - pure math, no I/O
/// Contains: records, params, geometry, invariant checkers, queries
pub mod core;

/// Port definitions - trait contracts for adapters
/// Contains: RecordStore trait, Transaction guard
pub mod ports;

/// Adapter implementations - swappable components
/// Contains: storage, script submodules
pub mod adapters;

/// Engine - orchestration layer
/// Contains: Canvas main struct
pub mod engine;

// ============================================================================
// RE-EXPORTS (public API)
// ============================================================================

// Core types
pub use crate::core::{
    AttrValue, Circle, CircleGeometry, CircleParams, Field, Frame, FrameGeometry, FrameParams, Id,
    Position, ValidationError, ValidationErrors, Violation,
};
pub use crate::core::config::CanvasConfig;
pub use crate::core::invariants::{validate_circle, validate_frame};
pub use crate::core::query::{filter_circles, CircleExtremes, CircleQuery, QueryResult};

// Port traits
pub use crate::ports::{RecordStore, StoreError, Transaction};

// Adapters
pub use crate::adapters::storage::MemoryStore;

// Engine
pub use crate::engine::{Canvas, CanvasError, CanvasResult, Created, FrameDetails};
