//! MargaNav - Navigation decision engine for a line-course competition robot
//!
//! Converts per-cycle sensor snapshots (reflectance line sensors, a forward
//! ranging sensor, an RGB color sensor) into differential-drive commands and
//! sequences blocking maneuvers (obstacle circumvention with wall-hug,
//! color-zone search, concentric-target center seek) for a fixed-rate
//! control loop.
//!
//! Hardware is reached only through the boundary traits in [`hal`]; the
//! [`devices::mock`] rig provides deterministic implementations for
//! hardware-free runs and tests.

pub mod config;
pub mod devices;
pub mod error;
pub mod hal;
pub mod nav;
pub mod perception;

// Re-export commonly used types
pub use config::NavConfig;
pub use error::{Error, Result};
pub use nav::{AvoidanceReport, Navigator, Outcome};
pub use perception::{Color, SensorSnapshot};
