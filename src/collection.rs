//! Finalized record collection
//!
//! Stores finalized records in insertion order. Totals are derived from the
//! records on every call and never cached.
//!
//! # Sharing
//!
//! [`Collection`] is a plain value with no interior locking. When several
//! tasks read and write the same collection (a UI and a background autosave,
//! for example), wrap it in [`SharedCollection`], which serializes every
//! operation behind one mutex.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::CollectionError;
use crate::measurement::validate_name;
use crate::measurement::{FinalizedRecord, LocationPoint, MeasuredArea, MeasuredLine, RecordId};

/// Aggregate totals read in one pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// Sum of `distance_m` over all lines
    pub distance_m: f64,
    /// Sum of `area_m2` over all areas
    pub area_m2: f64,
}

/// Ordered list of finalized records
#[derive(Debug, Clone, Default)]
pub struct Collection {
    records: Vec<FinalizedRecord>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized record
    ///
    /// Ids are unique within a collection; adding a record whose id is
    /// already present fails with `DuplicateId` and leaves the list unchanged.
    pub fn add(
        &mut self,
        record: impl Into<FinalizedRecord>,
    ) -> Result<RecordId, CollectionError> {
        let record = record.into();
        let id = record.id();
        if self.get(id).is_some() {
            crate::log_warn!("collection already holds record {}", id);
            return Err(CollectionError::DuplicateId(id));
        }
        crate::log_debug!("collection add {} '{}' ({})", record.kind_label(), record.name(), id);
        self.records.push(record);
        Ok(id)
    }

    /// Remove a record by id
    ///
    /// Unknown ids are ignored. Returns the removed record, if any.
    pub fn remove(&mut self, id: RecordId) -> Option<FinalizedRecord> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        let removed = self.records.remove(index);
        crate::log_debug!(
            "collection remove {} '{}' ({})",
            removed.kind_label(),
            removed.name(),
            id
        );
        Some(removed)
    }

    /// Rename a location point in place
    ///
    /// Lines and areas keep the name they were finalized with.
    pub fn rename_point(
        &mut self,
        id: RecordId,
        name: impl AsRef<str>,
    ) -> Result<(), CollectionError> {
        let name = validate_name(name.as_ref())?;
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(CollectionError::NotFound(id))?;

        match slot {
            FinalizedRecord::Point(point) => {
                *point = point.renamed(name);
                Ok(())
            }
            FinalizedRecord::Line(_) | FinalizedRecord::Area(_) => {
                Err(CollectionError::NotRenameable(id))
            }
        }
    }

    pub fn get(&self, id: RecordId) -> Option<&FinalizedRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Records in insertion order; restartable by calling again
    pub fn list(&self) -> impl Iterator<Item = &FinalizedRecord> + '_ {
        self.records.iter()
    }

    pub fn points(&self) -> impl Iterator<Item = &LocationPoint> + '_ {
        self.records.iter().filter_map(FinalizedRecord::as_point)
    }

    pub fn lines(&self) -> impl Iterator<Item = &MeasuredLine> + '_ {
        self.records.iter().filter_map(FinalizedRecord::as_line)
    }

    pub fn areas(&self) -> impl Iterator<Item = &MeasuredArea> + '_ {
        self.records.iter().filter_map(FinalizedRecord::as_area)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Sum of line distances currently present, in meters
    pub fn total_distance(&self) -> f64 {
        self.lines().fold(0.0, |acc, l| acc + l.distance_m())
    }

    /// Sum of areas currently present, in square meters
    pub fn total_area(&self) -> f64 {
        self.areas().fold(0.0, |acc, a| acc + a.area_m2())
    }

    pub fn totals(&self) -> Totals {
        Totals {
            distance_m: self.total_distance(),
            area_m2: self.total_area(),
        }
    }
}

/// Collection shared between tasks behind a single mutex
#[derive(Debug, Clone, Default)]
pub struct SharedCollection {
    inner: Arc<Mutex<Collection>>,
}

impl SharedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, record: impl Into<FinalizedRecord>) -> Result<RecordId, CollectionError> {
        self.lock().add(record)
    }

    pub fn remove(&self, id: RecordId) -> Option<FinalizedRecord> {
        self.lock().remove(id)
    }

    pub fn rename_point(&self, id: RecordId, name: impl AsRef<str>) -> Result<(), CollectionError> {
        self.lock().rename_point(id, name)
    }

    /// Copy of the collection at this instant
    pub fn snapshot(&self) -> Collection {
        self.lock().clone()
    }

    /// Both totals computed under the same lock
    pub fn totals(&self) -> Totals {
        self.lock().totals()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Collection> {
        // Every mutation completes before the guard drops, so a poisoned
        // collection is still consistent
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl From<Collection> for SharedCollection {
    fn from(collection: Collection) -> Self {
        Self {
            inner: Arc::new(Mutex::new(collection)),
        }
    }
}
