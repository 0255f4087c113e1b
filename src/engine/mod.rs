//! # Engine
//!
//! The orchestration layer that wires everything together.
//!
//! This is where:
//! - Configuration is applied
//! - The record store is connected to the checkers
//! - Transactions bound every mutation
//! - The unified canvas interface is exposed

mod canvas;

pub use canvas::{Canvas, CanvasError, CanvasResult, Created, FrameDetails, RecordKind};
