//! Differential drive trait

use crate::error::Result;

/// Differential drive controller trait
///
/// All commands are fire-and-forget at the driver level: the command takes
/// effect immediately and stays in effect until the next command. Any
/// blocking is done by the caller through its [`Clock`](crate::hal::Clock).
pub trait DriveMotor: Send {
    /// Stop both motors immediately
    fn stop(&mut self) -> Result<()>;

    /// Drive forward
    ///
    /// # Arguments
    /// * `speed` - PWM value (0-255)
    fn forward(&mut self, speed: u8) -> Result<()>;

    /// Drive backward
    ///
    /// # Arguments
    /// * `speed` - PWM value (0-255)
    fn backward(&mut self, speed: u8) -> Result<()>;

    /// Pivot left (left wheel backward, right wheel forward)
    fn turn_left(&mut self, speed: u8) -> Result<()>;

    /// Pivot right (left wheel forward, right wheel backward)
    fn turn_right(&mut self, speed: u8) -> Result<()>;

    /// Gentle curve left while moving forward (right wheel at full
    /// commanded speed, left wheel reduced)
    fn curve_left(&mut self, speed: u8) -> Result<()>;

    /// Gentle curve right while moving forward (mirrored)
    fn curve_right(&mut self, speed: u8) -> Result<()>;
}
