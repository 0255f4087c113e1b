//! # Ports
//!
//! Trait definitions for adapters. Contracts only, no implementations.
//!
//! The core never touches storage. The engine reads peers and writes records
//! through the `RecordStore` port, and every mutation runs inside a
//! `Transaction` guard.

mod store;

pub use store::{RecordStore, StoreError, StoreResult, Transaction};
