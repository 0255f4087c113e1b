//! # Adapters
//!
//! Swappable implementations of port traits, and the outer surfaces that
//! drive the engine:
//! - Storage adapters: Memory
//! - Command scripts: JSON batches of canvas operations
//!
//! Adapters can be swapped without changing core logic.

pub mod storage;
pub mod script;
