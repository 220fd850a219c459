//! A counter behind a reader/writer lock.
//!
//! Many threads may read the value at once; writes take the lock
//! exclusively. Used by the shared-locking demo, where two threads interleave
//! increments and reads.

use std::sync::RwLock;

use crate::error::TourError;

#[derive(Debug, Default)]
pub struct ReadersWriterCounter {
    value: RwLock<u32>,
}

impl ReadersWriterCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any number of readers can observe the value concurrently.
    pub fn get(&self) -> Result<u32, TourError> {
        self.value
            .read()
            .map(|guard| *guard)
            .map_err(|_| TourError::PoisonedLock)
    }

    /// Writers are exclusive.
    pub fn increment(&self) -> Result<u32, TourError> {
        self.value
            .write()
            .map(|mut guard| {
                *guard += 1;
                *guard
            })
            .map_err(|_| TourError::PoisonedLock)
    }

    pub fn reset(&self) -> Result<(), TourError> {
        self.value
            .write()
            .map(|mut guard| *guard = 0)
            .map_err(|_| TourError::PoisonedLock)
    }
}
