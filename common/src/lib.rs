//! Measurement core of the bicycle speed computer.
//!
//! This crate contains the platform-agnostic logic shared by the firmware and
//! the host test-suite:
//!
//! - [`capture`]: Rotation edge debounce and interval derivation (interrupt context)
//! - [`measurement`]: The single interrupt-safe handoff between capture and estimator
//! - [`estimator`]: Instantaneous speed, idle detection and smoothed average
//! - [`schedule`]: Drift-free periodic wake bookkeeping with lateness detection
//! - [`task`]: One estimator period: wake, consume, estimate, render
//! - [`display`]: Display collaborator contract and per-period readout
//! - [`screen`]: `embedded-graphics` speed screen implementing the display contract
//! - [`config`]: Calibration and timing constants
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p speedo-common
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware links the crate as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod capture;
pub mod colors;
pub mod config;
pub mod display;
pub mod estimator;
pub mod measurement;
pub mod schedule;
pub mod screen;
pub mod styles;
pub mod task;

// Re-export commonly used items
pub use capture::{EdgeOutcome, EventCapture};
pub use config::SpeedoConfig;
pub use display::{Diagnostics, SpeedDisplay, SpeedReadout};
pub use estimator::{IntervalKind, SpeedEstimator, SpeedState};
pub use measurement::{NO_INTERVAL, SharedMeasurement};
pub use schedule::{PeriodicSchedule, Wake};
pub use screen::SpeedScreen;
pub use task::{CycleReport, SpeedTask};
