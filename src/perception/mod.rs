//! Perception: color classification and per-cycle sensor snapshots

pub mod color;
pub mod snapshot;

pub use color::{classify, Color, NO_PULSE};
pub use snapshot::{ChannelFreqs, SensorSnapshot};
