//! In-progress flag for operations that suspend (PNG encoding, native share).
//!
//! A second caller is turned away while a guard is alive instead of queueing
//! behind the first; the flag clears when the guard drops, on every exit path.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct InFlight {
    busy: AtomicBool,
}

#[must_use = "the operation is only marked in progress while the guard is held"]
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    flag: &'a InFlight,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the flag, or returns `None` if another operation holds it.
    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| InFlightGuard { flag: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.busy.store(false, Ordering::Release);
    }
}
