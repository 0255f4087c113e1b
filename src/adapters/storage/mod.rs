//! # Storage Adapters
//!
//! Implementations of the RecordStore port for different storage backends.
//!
//! Available adapters:
//! - `MemoryStore` - In-memory ordered maps with snapshot transactions

mod memory;

pub use memory::MemoryStore;
