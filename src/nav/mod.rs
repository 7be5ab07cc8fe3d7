//! Navigation decision engine
//!
//! Stateful policy module: given a per-cycle [`SensorSnapshot`], each policy
//! issues one drive command and classifies what it observed as an
//! [`Outcome`]. Task switching on outcomes lives in the caller; the engine
//! only carries search-alternation state across calls within one task.
//!
//! [`SensorSnapshot`]: crate::perception::SensorSnapshot

pub mod avoidance;
pub mod engine;

pub use avoidance::AvoidanceReport;
pub use engine::{Navigator, Outcome, SearchDirection, SearchState};
