//! Async tasks for the speedometer firmware.
//!
//! - `sensor`: rotation sensor edges, runs on the interrupt executor
//! - `estimator`: periodic speed estimation and display refresh

pub mod estimator;
pub mod sensor;

pub use estimator::speed_estimator_task;
pub use sensor::rotation_sensor_task;
