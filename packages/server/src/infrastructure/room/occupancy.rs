//! Reservation counter that decides when a room may be torn down.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Sentinel stored once the room has been closed.
const CLOSED: usize = usize::MAX;

/// Number of connections that reserved a seat in a room and have not left.
///
/// Joins reserve before their command reaches the dispatch task, so a
/// non-zero count covers joins still in flight. Closing is a single
/// compare-and-swap from zero, which makes "is it empty?" and "close it"
/// one atomic step: a concurrent reservation either lands first (and the
/// close fails) or observes the closed state (and the joiner retries on a
/// fresh room).
#[derive(Debug, Default)]
pub(crate) struct Occupancy(AtomicUsize);

impl Occupancy {
    /// Reserve a seat. Fails once the room is closed.
    pub(crate) fn try_reserve(&self) -> bool {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n != CLOSED).then(|| n + 1)
            })
            .is_ok()
    }

    /// Give a seat back.
    ///
    /// Returns `false` when there was no seat to give back.
    pub(crate) fn release(&self) -> bool {
        match self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n != CLOSED && n > 0).then(|| n - 1)
            }) {
            Ok(_) => true,
            Err(n) => {
                tracing::warn!(
                    closed = n == CLOSED,
                    "Released a seat that was never reserved"
                );
                false
            }
        }
    }

    /// Close the room if nobody holds a seat.
    pub(crate) fn try_close(&self) -> bool {
        self.0
            .compare_exchange(0, CLOSED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.0.load(Ordering::Acquire) == CLOSED
    }

    /// Seats currently held; zero once closed.
    pub(crate) fn current(&self) -> usize {
        match self.0.load(Ordering::Acquire) {
            CLOSED => 0,
            n => n,
        }
    }
}
