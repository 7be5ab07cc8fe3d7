//! Claw/arm actuator trait
//!
//! The navigation engine never touches the claw; pickup and drop sequences
//! are orchestrated by the mission runner between navigation tasks.

use crate::error::Result;

/// Two-servo claw driver trait (clamp servo + arm servo)
pub trait ClawDriver: Send {
    /// Open the clamp fully
    fn open_clamp(&mut self) -> Result<()>;

    /// Close the clamp fully
    fn close_clamp(&mut self) -> Result<()>;

    /// Raise the arm
    fn arm_up(&mut self) -> Result<()>;

    /// Lower the arm to ground level
    fn arm_down(&mut self) -> Result<()>;

    /// Move the arm to the carrying position
    fn arm_carry(&mut self) -> Result<()>;
}
