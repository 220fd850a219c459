//! Producer/consumer over an ownership-transfer channel.
//!
//! The classic version of this exercise shares a bare queue, a counter, and a
//! completion flag between two threads with no synchronization at all, and
//! its final count is whatever the race happened to produce. This rendition
//! deliberately deviates from that: items move through a channel, so the
//! consumer's "am I done?" question is answered by channel disconnection
//! instead of an unsynchronized flag, and the net counter is atomic. The
//! hazard being corrected is documented in DESIGN.md; the payoff is that the
//! pipeline always terminates and the net count is deterministic.

use std::sync::atomic::{AtomicI64, Ordering};
use std::thread;

use crossbeam::channel;

use crate::error::TourError;

/// How many integers the producer emits.
pub const ITEM_COUNT: usize = 500;

/// Run the pipeline to completion and return the final net count.
///
/// The producer increments the net count once per item sent; the consumer
/// decrements once per item received. Both threads are joined before the
/// count is read, so the returned value reflects every send and receive.
/// With a channel carrying the items, nothing can be lost or double-counted
/// and the result is always zero.
pub fn run_pipeline(items: usize) -> Result<i64, TourError> {
    let (sender, receiver) = channel::unbounded();
    let net = AtomicI64::new(0);

    thread::scope(|s| {
        let net_ref = &net;

        // Producer owns the sender; dropping it on exit closes the channel,
        // which is the consumer's termination signal.
        let producer = s.spawn(move || {
            for item in 0..items {
                if sender.send(item).is_err() {
                    break;
                }
                net_ref.fetch_add(1, Ordering::SeqCst);
            }
        });

        let consumer = s.spawn(move || {
            while receiver.recv().is_ok() {
                net_ref.fetch_sub(1, Ordering::SeqCst);
            }
        });

        let joined = [producer.join(), consumer.join()];
        if joined.into_iter().any(|outcome| outcome.is_err()) {
            return Err(TourError::WorkerPanicked);
        }
        Ok(())
    })?;

    Ok(net.into_inner())
}
