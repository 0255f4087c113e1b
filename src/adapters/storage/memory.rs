//! # Memory Storage Adapter
//!
//! In-memory record store using ordered maps.
//! Fast, but volatile (data lost on shutdown).
//!
//! Transactions snapshot the whole store on `begin` and restore it on
//! `rollback`. Ids come from per-table sequences that are part of the
//! snapshot, so a rolled-back insert does not burn an id.
//!
//! Good for:
//! - Testing
//! - Single-process tools
//! - Small datasets

use std::collections::BTreeMap;

use crate::core::{Circle, CircleGeometry, Frame, FrameGeometry, Id};
use crate::ports::{RecordStore, StoreError, StoreResult};

#[derive(Clone, Debug, Default)]
struct Tables {
    frames: BTreeMap<Id, Frame>,
    circles: BTreeMap<Id, Circle>,
    last_frame_id: u64,
    last_circle_id: u64,
}

/// In-memory storage adapter
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Live state, including uncommitted writes
    tables: Tables,

    /// State at `begin`, present while a transaction is open
    snapshot: Option<Tables>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn frame_mut(&mut self, id: Id) -> StoreResult<&mut Frame> {
        self.tables
            .frames
            .get_mut(&id)
            .ok_or(StoreError::UnknownFrame(id))
    }
}

impl RecordStore for MemoryStore {
    fn begin(&mut self) -> StoreResult<()> {
        if self.snapshot.is_some() {
            return Err(StoreError::TransactionInProgress);
        }
        self.snapshot = Some(self.tables.clone());
        Ok(())
    }

    fn commit(&mut self) -> StoreResult<()> {
        match self.snapshot.take() {
            Some(_) => Ok(()),
            None => Err(StoreError::NoTransaction),
        }
    }

    fn rollback(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.tables = snapshot;
        }
    }

    fn in_transaction(&self) -> bool {
        self.snapshot.is_some()
    }

    fn insert_frame(&mut self, geometry: FrameGeometry) -> StoreResult<Frame> {
        self.tables.last_frame_id += 1;
        let frame = Frame::new(Id::new(self.tables.last_frame_id), geometry);
        self.tables.frames.insert(frame.id, frame);
        Ok(frame)
    }

    fn insert_circle(&mut self, frame_id: Id, geometry: CircleGeometry) -> StoreResult<Circle> {
        self.frame_mut(frame_id)?.circles_count += 1;

        self.tables.last_circle_id += 1;
        let circle = Circle::new(Id::new(self.tables.last_circle_id), frame_id, geometry);
        self.tables.circles.insert(circle.id, circle);
        Ok(circle)
    }

    fn update_circle(&mut self, id: Id, geometry: CircleGeometry) -> StoreResult<Circle> {
        let circle = self
            .tables
            .circles
            .get_mut(&id)
            .ok_or(StoreError::UnknownCircle(id))?;

        circle.x = geometry.x;
        circle.y = geometry.y;
        circle.diameter = geometry.diameter;
        Ok(*circle)
    }

    fn remove_frame(&mut self, id: Id) -> Option<Frame> {
        let frame = self.tables.frames.remove(&id)?;
        self.tables.circles.retain(|_, c| c.frame_id != id);
        Some(frame)
    }

    fn remove_circle(&mut self, id: Id) -> Option<Circle> {
        let circle = self.tables.circles.remove(&id)?;
        if let Ok(frame) = self.frame_mut(circle.frame_id) {
            frame.circles_count = frame.circles_count.saturating_sub(1);
        }
        Some(circle)
    }

    fn clear(&mut self) {
        self.tables.frames.clear();
        self.tables.circles.clear();
    }

    fn frame(&self, id: Id) -> Option<Frame> {
        self.tables.frames.get(&id).copied()
    }

    fn circle(&self, id: Id) -> Option<Circle> {
        self.tables.circles.get(&id).copied()
    }

    fn frames(&self) -> Box<dyn Iterator<Item = &Frame> + '_> {
        Box::new(self.tables.frames.values())
    }

    fn circles(&self) -> Box<dyn Iterator<Item = &Circle> + '_> {
        Box::new(self.tables.circles.values())
    }

    fn frame_count(&self) -> usize {
        self.tables.frames.len()
    }

    fn circle_count(&self) -> usize {
        self.tables.circles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, side: f64) -> FrameGeometry {
        FrameGeometry::new(x, y, side, side)
    }

    #[test]
    fn test_memory_store_assigns_sequential_ids() {
        let mut store = MemoryStore::new();

        let a = store.insert_frame(square(0.0, 0.0, 2.0)).unwrap();
        let b = store.insert_frame(square(10.0, 0.0, 2.0)).unwrap();

        assert_eq!(a.id, Id::new(1));
        assert_eq!(b.id, Id::new(2));
        assert_eq!(store.frame_count(), 2);
    }

    #[test]
    fn test_memory_store_counter_cache() {
        let mut store = MemoryStore::new();
        let frame = store.insert_frame(square(10.0, 10.0, 10.0)).unwrap();

        let c1 = store.insert_circle(frame.id, CircleGeometry::new(8.0, 8.0, 2.0)).unwrap();
        store.insert_circle(frame.id, CircleGeometry::new(12.0, 12.0, 2.0)).unwrap();
        assert_eq!(store.frame(frame.id).unwrap().circles_count, 2);

        store.remove_circle(c1.id);
        assert_eq!(store.frame(frame.id).unwrap().circles_count, 1);
        assert_eq!(store.circle_count(), 1);
    }

    #[test]
    fn test_memory_store_circle_needs_frame() {
        let mut store = MemoryStore::new();

        let result = store.insert_circle(Id::new(99), CircleGeometry::new(0.0, 0.0, 1.0));

        assert_eq!(result, Err(StoreError::UnknownFrame(Id::new(99))));
        assert_eq!(store.circle_count(), 0);
    }

    #[test]
    fn test_memory_store_update_circle() {
        let mut store = MemoryStore::new();
        let frame = store.insert_frame(square(10.0, 10.0, 10.0)).unwrap();
        let circle = store.insert_circle(frame.id, CircleGeometry::new(8.0, 8.0, 2.0)).unwrap();

        let updated = store.update_circle(circle.id, CircleGeometry::new(9.0, 9.0, 1.0)).unwrap();

        assert_eq!(updated.frame_id, frame.id);
        assert_eq!(store.circle(circle.id).unwrap().geometry(), CircleGeometry::new(9.0, 9.0, 1.0));
        assert!(matches!(
            store.update_circle(Id::new(42), CircleGeometry::new(0.0, 0.0, 1.0)),
            Err(StoreError::UnknownCircle(_))
        ));
    }

    #[test]
    fn test_memory_store_cascading_delete() {
        let mut store = MemoryStore::new();
        let keep = store.insert_frame(square(0.0, 0.0, 4.0)).unwrap();
        let frame = store.insert_frame(square(10.0, 10.0, 10.0)).unwrap();
        store.insert_circle(keep.id, CircleGeometry::new(0.0, 0.0, 1.0)).unwrap();
        store.insert_circle(frame.id, CircleGeometry::new(8.0, 8.0, 2.0)).unwrap();

        assert!(store.remove_frame(frame.id).is_some());

        assert!(!store.contains_frame(frame.id));
        assert!(!store.has_circles(frame.id));
        assert!(store.has_circles(keep.id));
        assert!(store.remove_frame(frame.id).is_none());
    }

    #[test]
    fn test_memory_store_rollback_restores_snapshot() {
        let mut store = MemoryStore::new();
        let frame = store.insert_frame(square(0.0, 0.0, 4.0)).unwrap();

        store.begin().unwrap();
        store.insert_circle(frame.id, CircleGeometry::new(0.0, 0.0, 1.0)).unwrap();
        store.insert_frame(square(10.0, 0.0, 4.0)).unwrap();
        assert_eq!(store.frame_count(), 2);
        store.rollback();

        assert!(!store.in_transaction());
        assert_eq!(store.frame_count(), 1);
        assert_eq!(store.circle_count(), 0);
        assert_eq!(store.frame(frame.id).unwrap().circles_count, 0);

        let next = store.insert_frame(square(10.0, 0.0, 4.0)).unwrap();
        assert_eq!(next.id, Id::new(2));
    }

    #[test]
    fn test_memory_store_commit_keeps_writes() {
        let mut store = MemoryStore::new();

        store.begin().unwrap();
        assert_eq!(store.begin(), Err(StoreError::TransactionInProgress));
        store.insert_frame(square(0.0, 0.0, 4.0)).unwrap();
        store.commit().unwrap();

        assert_eq!(store.frame_count(), 1);
        assert_eq!(store.commit(), Err(StoreError::NoTransaction));
    }

    #[test]
    fn test_memory_store_iteration_order() {
        let mut store = MemoryStore::new();
        let frame = store.insert_frame(square(0.0, 0.0, 100.0)).unwrap();
        for i in 0..5 {
            store
                .insert_circle(frame.id, CircleGeometry::new(i as f64 * 10.0, 0.0, 1.0))
                .unwrap();
        }

        let ids: Vec<u64> = store.circles().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let siblings = store.sibling_circles(frame.id, Some(Id::new(3)));
        assert_eq!(siblings.len(), 4);
        assert!(siblings.iter().all(|c| c.id != Id::new(3)));
    }

    #[test]
    fn test_memory_store_clear() {
        let mut store = MemoryStore::new();
        let frame = store.insert_frame(square(0.0, 0.0, 4.0)).unwrap();
        store.insert_circle(frame.id, CircleGeometry::new(0.0, 0.0, 1.0)).unwrap();

        store.clear();

        assert_eq!(store.frame_count(), 0);
        assert_eq!(store.circle_count(), 0);
    }
}
