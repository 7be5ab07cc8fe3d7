//! Obstacle avoidance macro-maneuver and wall-hug sub-policy
//!
//! The avoidance sequence is deliberately open-loop: a fixed series of timed
//! turns and advances that boxes around the obstacle on its right side. Only
//! the wall-hug leg closes the loop, polling the ranging sensor to track the
//! obstacle's flank until it ends.

use super::engine::{Navigator, Outcome};
use crate::error::Result;
use crate::hal::{Clock, DriveMotor, SensorHub};
use std::time::Duration;

/// Result of one avoidance maneuver
///
/// The maneuver itself models no failure: `outcome` is always
/// [`Outcome::Continue`]. `final_distance` is the forward range read after
/// the last turn, so the caller can judge for itself whether the path ahead
/// is actually clear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvoidanceReport {
    pub outcome: Outcome,
    pub final_distance: Option<f32>,
}

impl Navigator {
    /// Circumvent an obstacle by boxing around its right side.
    ///
    /// Blocking seven-step sequence: settle, turn +90°, advance past the
    /// near edge, turn −90°, wall-hug along the flank until it ends, turn
    /// −90°, advance, turn +90° back onto the original heading.
    pub fn avoid_obstacle_right(
        &self,
        drive: &mut dyn DriveMotor,
        sensors: &mut dyn SensorHub,
        clock: &dyn Clock,
    ) -> Result<AvoidanceReport> {
        let normal = self.config().speeds.normal;
        let turn_speed = self.config().speeds.turn;
        let settle = Duration::from_millis(self.config().timing.pre_maneuver_settle_ms);
        let advance = Duration::from_millis(self.config().timing.clear_advance_ms);

        log::info!("Avoiding obstacle on the right");

        drive.stop()?;
        clock.sleep(settle);

        // Face along the obstacle's near edge
        self.turn(drive, clock, 90, turn_speed)?;
        drive.forward(normal)?;
        clock.sleep(advance);

        // Travel parallel to the obstacle's flank
        self.turn(drive, clock, -90, turn_speed)?;
        let hug_steps = self.wall_hug_until_clear(drive, sensors, clock)?;

        // Re-aim toward the original track and clear the far edge
        self.turn(drive, clock, -90, turn_speed)?;
        drive.forward(normal)?;
        clock.sleep(advance);
        self.turn(drive, clock, 90, turn_speed)?;

        drive.stop()?;
        let final_distance = sensors.read_distance()?;

        log::info!(
            "Avoidance done after {} wall-hug steps, forward range {:?}cm",
            hug_steps,
            final_distance
        );

        Ok(AvoidanceReport {
            outcome: Outcome::Continue,
            final_distance,
        })
    }

    /// Track the obstacle's flank at roughly constant distance until it
    /// ends.
    ///
    /// Polls the ranging sensor each step: too close curves away, the good
    /// band drives straight, a jump past the clear band (or a lost echo)
    /// means the obstacle is passed and the loop breaks early. Readings in
    /// the narrow band between "good" and "clear" leave the previous motor
    /// state in effect. Stops the motors on every exit path and returns the
    /// number of polls performed, bounded by the configured step cap.
    pub fn wall_hug_until_clear(
        &self,
        drive: &mut dyn DriveMotor,
        sensors: &mut dyn SensorHub,
        clock: &dyn Clock,
    ) -> Result<usize> {
        let distances = &self.config().distances;
        let near = distances.wall_hug_cm - distances.hug_near_margin_cm;
        let far = distances.wall_hug_cm + distances.hug_far_margin_cm;
        let clear = distances.wall_hug_cm + distances.hug_clear_margin_cm;
        let normal = self.config().speeds.normal;
        let period = Duration::from_millis(self.config().timing.wall_hug_period_ms);
        let max_steps = self.config().search.wall_hug_max_steps;

        let mut steps = 0;
        while steps < max_steps {
            let reading = sensors.read_distance()?;
            steps += 1;

            match reading {
                // The maneuver passes the obstacle on the robot's left, so
                // "away from the wall" is a right curve
                Some(d) if d < near => drive.curve_right(normal)?,
                Some(d) if d > 0.0 && d < far => drive.forward(normal)?,
                Some(d) if d > clear => {
                    log::debug!("Wall ended at {:.1}cm after {} steps", d, steps);
                    break;
                }
                None => {
                    log::debug!("Echo lost after {} steps, wall passed", steps);
                    break;
                }
                // Between far and clear: hold the previous motor state
                _ => {}
            }

            clock.sleep(period);
        }

        drive.stop()?;
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavConfig;
    use crate::devices::mock::{DriveCommand, MockClock, MockDrive, ScriptedSensors};

    fn rig() -> (Navigator, MockDrive, MockClock, ScriptedSensors) {
        let clock = MockClock::new();
        let config = NavConfig::default();
        let nav = Navigator::new(config.clone(), &clock);
        (nav, MockDrive::new(), clock, ScriptedSensors::new(config))
    }

    #[test]
    fn test_wall_hug_bands() {
        let (nav, mut drive, clock, mut sensors) = rig();

        // hug=10: near band below 7, good band to 15, hold to 20, clear above
        sensors.push_distance(Some(5.0)); // too close -> curve away
        sensors.push_distance(Some(10.0)); // good -> straight
        sensors.push_distance(Some(17.0)); // hold band -> no command
        sensors.push_distance(Some(25.0)); // wall ended -> break

        let steps = nav
            .wall_hug_until_clear(&mut drive, &mut sensors, &clock)
            .unwrap();

        assert_eq!(steps, 4);
        assert_eq!(
            drive.commands(),
            &[
                DriveCommand::CurveRight(150),
                DriveCommand::Forward(150),
                DriveCommand::Stop,
            ]
        );
        // The break skips the final poll delay: three sleeps, not four
        assert_eq!(clock.sleeps().len(), 3);
    }

    #[test]
    fn test_wall_hug_stops_issuing_commands_after_clear() {
        let (nav, mut drive, clock, mut sensors) = rig();

        sensors.push_distance(Some(10.0));
        sensors.push_distance(Some(30.0)); // clear at poll 2
        sensors.push_distance(Some(10.0)); // never consumed

        let steps = nav
            .wall_hug_until_clear(&mut drive, &mut sensors, &clock)
            .unwrap();

        assert_eq!(steps, 2);
        assert_eq!(
            drive.commands(),
            &[DriveCommand::Forward(150), DriveCommand::Stop]
        );
        assert_eq!(sensors.remaining_distances(), 1);
    }

    #[test]
    fn test_wall_hug_lost_echo_means_cleared() {
        let (nav, mut drive, clock, mut sensors) = rig();

        sensors.push_distance(Some(10.0));
        sensors.push_distance(None);

        let steps = nav
            .wall_hug_until_clear(&mut drive, &mut sensors, &clock)
            .unwrap();
        assert_eq!(steps, 2);
        assert_eq!(drive.last(), Some(DriveCommand::Stop));
    }

    #[test]
    fn test_wall_hug_exhausts_step_cap() {
        let (nav, mut drive, clock, mut sensors) = rig();

        for _ in 0..40 {
            sensors.push_distance(Some(10.0));
        }

        let steps = nav
            .wall_hug_until_clear(&mut drive, &mut sensors, &clock)
            .unwrap();

        assert_eq!(steps, 30);
        // 30 straight-ahead commands plus the final stop
        assert_eq!(drive.commands().len(), 31);
        assert_eq!(drive.last(), Some(DriveCommand::Stop));
    }

    #[test]
    fn test_avoidance_always_continues_and_reports_range() {
        let (nav, mut drive, clock, mut sensors) = rig();

        sensors.push_distance(Some(10.0)); // wall-hug: alongside
        sensors.push_distance(Some(40.0)); // wall-hug: cleared
        sensors.push_distance(Some(120.0)); // final forward check

        let report = nav
            .avoid_obstacle_right(&mut drive, &mut sensors, &clock)
            .unwrap();

        assert_eq!(report.outcome, Outcome::Continue);
        assert_eq!(report.final_distance, Some(120.0));
    }

    #[test]
    fn test_avoidance_command_sequence() {
        let (nav, mut drive, clock, mut sensors) = rig();

        sensors.push_distance(Some(40.0)); // wall already clear

        nav.avoid_obstacle_right(&mut drive, &mut sensors, &clock)
            .unwrap();

        use DriveCommand::*;
        assert_eq!(
            drive.commands(),
            &[
                Stop,            // settle
                TurnRight(120),  // +90
                Stop,
                Forward(150),    // past the near edge
                TurnLeft(120),   // -90
                Stop,
                Stop,            // wall-hug exit (cleared on first poll)
                TurnLeft(120),   // -90
                Stop,
                Forward(150),    // past the far edge
                TurnRight(120),  // +90 back on heading
                Stop,
                Stop,            // final stop
            ]
        );
    }
}
