//! # Record Store Port
//!
//! Trait for persisting frames and circles.
//!
//! The store owns identity, the `circles_count` counter cache, cascading
//! delete and all-or-nothing transactions. It must serialize conflicting
//! writers: the checkers validate against whatever the store returns inside
//! the open transaction and trust it to still hold at commit.
//!
//! Implemented by storage adapters (Memory, ...)

use std::ops::{Deref, DerefMut};

use thiserror::Error;

use crate::core::{Circle, CircleGeometry, Frame, FrameGeometry, Id};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur inside the record store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// `begin` called while a transaction is open
    #[error("Transaction already in progress")]
    TransactionInProgress,

    /// `commit` called with no open transaction
    #[error("No transaction in progress")]
    NoTransaction,

    /// Write referenced a frame that does not exist
    #[error("Unknown frame: {0}")]
    UnknownFrame(Id),

    /// Write referenced a circle that does not exist
    #[error("Unknown circle: {0}")]
    UnknownCircle(Id),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Backend(String),
}

/// Trait for storing frames and circles
///
/// Storage adapters implement this trait. Iteration order is ascending id.
pub trait RecordStore: Send + Sync {
    // ========================================================================
    // TRANSACTIONS
    // ========================================================================

    /// Open a transaction
    ///
    /// Reads inside it see its own writes.
    fn begin(&mut self) -> StoreResult<()>;

    /// Make every write since `begin` permanent
    fn commit(&mut self) -> StoreResult<()>;

    /// Discard every write since `begin`
    ///
    /// A no-op when no transaction is open.
    fn rollback(&mut self);

    /// Check if a transaction is open
    fn in_transaction(&self) -> bool;

    // ========================================================================
    // WRITES
    // ========================================================================

    /// Persist a new frame, assigning its id
    fn insert_frame(&mut self, geometry: FrameGeometry) -> StoreResult<Frame>;

    /// Persist a new circle under `frame_id`, bumping its `circles_count`
    fn insert_circle(&mut self, frame_id: Id, geometry: CircleGeometry) -> StoreResult<Circle>;

    /// Replace a circle's geometry; its frame never changes
    fn update_circle(&mut self, id: Id, geometry: CircleGeometry) -> StoreResult<Circle>;

    /// Remove a frame and every circle it owns
    fn remove_frame(&mut self, id: Id) -> Option<Frame>;

    /// Remove a circle, decrementing its frame's `circles_count`
    fn remove_circle(&mut self, id: Id) -> Option<Circle>;

    /// Remove everything
    fn clear(&mut self);

    // ========================================================================
    // READS
    // ========================================================================

    /// Get a frame by id
    fn frame(&self, id: Id) -> Option<Frame>;

    /// Get a circle by id
    fn circle(&self, id: Id) -> Option<Circle>;

    /// Iterate over all frames
    fn frames(&self) -> Box<dyn Iterator<Item = &Frame> + '_>;

    /// Iterate over all circles
    fn circles(&self) -> Box<dyn Iterator<Item = &Circle> + '_>;

    /// Iterate over the circles owned by `frame_id`
    fn circles_of(&self, frame_id: Id) -> Box<dyn Iterator<Item = &Circle> + '_> {
        Box::new(self.circles().filter(move |c| c.frame_id == frame_id))
    }

    /// Every frame except `exclude`
    fn other_frames(&self, exclude: Option<Id>) -> Vec<Frame> {
        self.frames()
            .filter(|f| Some(f.id) != exclude)
            .copied()
            .collect()
    }

    /// Every circle of `frame_id` except `exclude`
    fn sibling_circles(&self, frame_id: Id, exclude: Option<Id>) -> Vec<Circle> {
        self.circles_of(frame_id)
            .filter(|c| Some(c.id) != exclude)
            .copied()
            .collect()
    }

    /// Check if a frame owns any circle
    fn has_circles(&self, frame_id: Id) -> bool {
        self.circles_of(frame_id).next().is_some()
    }

    /// Check if a frame exists
    fn contains_frame(&self, id: Id) -> bool {
        self.frame(id).is_some()
    }

    /// Number of stored frames
    fn frame_count(&self) -> usize {
        self.frames().count()
    }

    /// Number of stored circles
    fn circle_count(&self) -> usize {
        self.circles().count()
    }
}

/// An open transaction on a record store
///
/// Dereferences to the store. Dropping it without `commit` rolls back, so
/// every early return on a failure path leaves no partial writes behind.
pub struct Transaction<'a> {
    store: &'a mut dyn RecordStore,
    finished: bool,
}

impl<'a> Transaction<'a> {
    /// Begin a transaction on `store`
    pub fn begin(store: &'a mut dyn RecordStore) -> StoreResult<Self> {
        store.begin()?;
        Ok(Self {
            store,
            finished: false,
        })
    }

    /// Commit every write made through this transaction
    ///
    /// A failed commit is rolled back before the error is returned.
    pub fn commit(mut self) -> StoreResult<()> {
        self.finished = true;
        let result = self.store.commit();
        if result.is_err() {
            self.store.rollback();
        }
        result
    }

    /// Discard every write made through this transaction
    pub fn rollback(mut self) {
        self.finished = true;
        self.store.rollback();
    }
}

impl<'a> Deref for Transaction<'a> {
    type Target = dyn RecordStore + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.store
    }
}

impl<'a> DerefMut for Transaction<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.store
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            log::debug!("transaction dropped without commit, rolling back");
            self.store.rollback();
        }
    }
}
