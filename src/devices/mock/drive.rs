//! Command-recording drive motor mock

use crate::error::Result;
use crate::hal::DriveMotor;

/// One recorded drive command with its commanded speed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveCommand {
    Stop,
    Forward(u8),
    Backward(u8),
    TurnLeft(u8),
    TurnRight(u8),
    CurveLeft(u8),
    CurveRight(u8),
}

/// Drive mock that records every command in order
#[derive(Debug, Default)]
pub struct MockDrive {
    history: Vec<DriveCommand>,
}

impl MockDrive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full command history in issue order
    pub fn commands(&self) -> &[DriveCommand] {
        &self.history
    }

    /// Most recent command, if any
    pub fn last(&self) -> Option<DriveCommand> {
        self.history.last().copied()
    }

    /// Forget the recorded history
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl DriveMotor for MockDrive {
    fn stop(&mut self) -> Result<()> {
        self.history.push(DriveCommand::Stop);
        Ok(())
    }

    fn forward(&mut self, speed: u8) -> Result<()> {
        self.history.push(DriveCommand::Forward(speed));
        Ok(())
    }

    fn backward(&mut self, speed: u8) -> Result<()> {
        self.history.push(DriveCommand::Backward(speed));
        Ok(())
    }

    fn turn_left(&mut self, speed: u8) -> Result<()> {
        self.history.push(DriveCommand::TurnLeft(speed));
        Ok(())
    }

    fn turn_right(&mut self, speed: u8) -> Result<()> {
        self.history.push(DriveCommand::TurnRight(speed));
        Ok(())
    }

    fn curve_left(&mut self, speed: u8) -> Result<()> {
        self.history.push(DriveCommand::CurveLeft(speed));
        Ok(())
    }

    fn curve_right(&mut self, speed: u8) -> Result<()> {
        self.history.push(DriveCommand::CurveRight(speed));
        Ok(())
    }
}
