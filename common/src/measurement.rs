//! Shared measurement state: the single handoff between capture and estimator.
//!
//! Exactly one writer (the rotation sensor interrupt) and one reader (the
//! estimator task) touch this record. Both go through a
//! [`CriticalSectionRawMutex`], which masks interrupts for the duration of the
//! closure. The closures only load and store one `u32`, so the masked window
//! is a handful of instructions and can never block, allocate or re-enter.
//!
//! ```ignore
//! static SHARED: SharedMeasurement = SharedMeasurement::new();
//!
//! // Interrupt context
//! SHARED.publish(391);
//!
//! // Estimator task
//! let interval_ms = SHARED.consume(); // 391
//! let interval_ms = SHARED.consume(); // NO_INTERVAL
//! ```

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Sentinel meaning "no accepted rotation since the last consume".
pub const NO_INTERVAL: u32 = 0;

/// Latest rotation interval, guarded by an interrupt-safe critical section.
pub struct SharedMeasurement {
    interval_ms: Mutex<CriticalSectionRawMutex, Cell<u32>>,
}

impl SharedMeasurement {
    /// Create an empty measurement (holds [`NO_INTERVAL`]).
    pub const fn new() -> Self {
        Self {
            interval_ms: Mutex::new(Cell::new(NO_INTERVAL)),
        }
    }

    /// Publish the interval between the two most recent accepted rotations.
    ///
    /// Interrupt-safe and non-blocking. An unconsumed older interval is
    /// overwritten: rotations within one estimator period coalesce into the
    /// most recent one.
    #[inline]
    pub fn publish(
        &self,
        interval_ms: u32,
    ) {
        self.interval_ms.lock(|cell| cell.set(interval_ms));
    }

    /// Take the latest interval and reset the record to [`NO_INTERVAL`].
    ///
    /// Read and reset happen in the same critical section, so each published
    /// interval is observed at most once.
    #[inline]
    pub fn consume(&self) -> u32 { self.interval_ms.lock(|cell| cell.replace(NO_INTERVAL)) }
}

impl Default for SharedMeasurement {
    fn default() -> Self { Self::new() }
}
