//! Mock rig for hardware-free runs and tests
//!
//! Deterministic stand-ins for every boundary trait, so the whole decision
//! engine runs without a robot:
//!
//! | Component | Simulation method |
//! |-----------|-------------------|
//! | Drive motors | Records every command for later inspection |
//! | Sensor hub | Replays a scripted sequence of readings |
//! | Ranging sensor | Replays a scripted distance queue |
//! | Claw servos | Records moves and tracks clamp/arm position |
//! | Clock | Virtual time; `sleep` advances instantly |
//!
//! Scripts are plain queues: push readings in course order, run the engine,
//! then assert on the recorded commands and the virtual time spent.

pub mod claw;
pub mod clock;
pub mod drive;
pub mod sensors;

pub use claw::{ArmPosition, ClawMove, MockClaw};
pub use clock::MockClock;
pub use drive::{DriveCommand, MockDrive};
pub use sensors::{ScriptedReading, ScriptedSensors};
