//! Move-recording claw mock

use crate::error::Result;
use crate::hal::ClawDriver;

/// One recorded claw move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClawMove {
    OpenClamp,
    CloseClamp,
    ArmUp,
    ArmDown,
    ArmCarry,
}

/// Arm servo position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArmPosition {
    Up,
    #[default]
    Down,
    Carry,
}

/// Claw mock that records moves and tracks servo positions
#[derive(Debug, Default)]
pub struct MockClaw {
    moves: Vec<ClawMove>,
    clamp_closed: bool,
    arm: ArmPosition,
}

impl MockClaw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> &[ClawMove] {
        &self.moves
    }

    pub fn clamp_closed(&self) -> bool {
        self.clamp_closed
    }

    pub fn arm(&self) -> ArmPosition {
        self.arm
    }
}

impl ClawDriver for MockClaw {
    fn open_clamp(&mut self) -> Result<()> {
        self.moves.push(ClawMove::OpenClamp);
        self.clamp_closed = false;
        Ok(())
    }

    fn close_clamp(&mut self) -> Result<()> {
        self.moves.push(ClawMove::CloseClamp);
        self.clamp_closed = true;
        Ok(())
    }

    fn arm_up(&mut self) -> Result<()> {
        self.moves.push(ClawMove::ArmUp);
        self.arm = ArmPosition::Up;
        Ok(())
    }

    fn arm_down(&mut self) -> Result<()> {
        self.moves.push(ClawMove::ArmDown);
        self.arm = ArmPosition::Down;
        Ok(())
    }

    fn arm_carry(&mut self) -> Result<()> {
        self.moves.push(ClawMove::ArmCarry);
        self.arm = ArmPosition::Carry;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_positions() {
        let mut claw = MockClaw::new();
        assert!(!claw.clamp_closed());
        assert_eq!(claw.arm(), ArmPosition::Down);

        claw.close_clamp().unwrap();
        claw.arm_carry().unwrap();

        assert!(claw.clamp_closed());
        assert_eq!(claw.arm(), ArmPosition::Carry);
        assert_eq!(claw.moves(), &[ClawMove::CloseClamp, ClawMove::ArmCarry]);
    }
}
