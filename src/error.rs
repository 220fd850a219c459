//! Error type shared by every demo in the tour.

use thiserror::Error;

/// Things that can go wrong while running a demo.
///
/// Most demos are infallible by construction; the few that touch the
/// filesystem, compile regexes, or coordinate threads propagate through this
/// enum so the driver can report a failure instead of panicking mid-tour.
#[derive(Debug, Error)]
pub enum TourError {
    #[error("regex construction failed: {0}")]
    Regex(#[from] regex::Error),

    #[error("filesystem operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("a shared lock was poisoned by a panicking thread")]
    PoisonedLock,

    #[error("a worker thread panicked before it could be joined")]
    WorkerPanicked,
}
