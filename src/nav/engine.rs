//! Reactive navigation policies and blocking search primitives

use crate::config::NavConfig;
use crate::error::Result;
use crate::hal::{Clock, DriveMotor, SensorHub};
use crate::perception::{Color, SensorSnapshot};
use std::time::{Duration, Instant};

/// Outcome of one policy invocation
///
/// Classifies what the policy observed; the caller switches tasks or
/// invokes a compensating maneuver based on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep looping on the current task
    Continue,
    /// Reached a target color / zone boundary
    TargetFound,
    /// Obstacle ahead, motion stopped
    Obstacle,
    /// Lost the line or color track
    Lost,
    /// A bounded operation ran out of its time budget
    Timeout,
}

/// Sweep side for search alternation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchDirection {
    Left,
    #[default]
    Right,
}

impl SearchDirection {
    /// Opposite sweep side
    pub fn flip(self) -> Self {
        match self {
            SearchDirection::Left => SearchDirection::Right,
            SearchDirection::Right => SearchDirection::Left,
        }
    }
}

/// Search-alternation state carried across policy calls within one task
///
/// Must be reset at every task boundary via [`Navigator::reset`], otherwise
/// stale search bias leaks into the next task.
#[derive(Clone, Copy, Debug)]
pub struct SearchState {
    /// Side the next directional probe will sweep toward
    pub direction: SearchDirection,

    /// Consecutive not-found decision cycles
    pub count: u32,

    /// When the state was last reset (informational)
    pub last_reset: Instant,
}

impl SearchState {
    fn new(now: Instant) -> Self {
        Self {
            direction: SearchDirection::Right,
            count: 0,
            last_reset: now,
        }
    }
}

/// Navigation decision engine
///
/// Owns the calibration constants and the search-alternation state. All
/// hardware access goes through the boundary traits passed into each call,
/// so one engine instance works against real drivers and the mock rig
/// alike.
pub struct Navigator {
    config: NavConfig,
    state: SearchState,
}

impl Navigator {
    /// Create a new engine with freshly reset search state
    pub fn new(config: NavConfig, clock: &dyn Clock) -> Self {
        Self {
            config,
            state: SearchState::new(clock.now()),
        }
    }

    /// Calibration constants in use
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Current search-alternation state
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Reset search state for a new task episode
    ///
    /// Callers must invoke this before switching tasks. Idempotent.
    pub fn reset(&mut self, clock: &dyn Clock) {
        self.state = SearchState::new(clock.now());
        log::debug!("Search state reset");
    }

    /// Follow the black line using the two reflectance sensors.
    ///
    /// The obstacle check takes precedence over every line decision - a
    /// safety interrupt. No engine state is touched; the decision depends
    /// only on the snapshot.
    pub fn follow_black_line(
        &self,
        snapshot: &SensorSnapshot,
        drive: &mut dyn DriveMotor,
    ) -> Result<Outcome> {
        if snapshot.obstacle_detected {
            drive.stop()?;
            log::info!(
                "Obstacle at {:.1}cm, stopping",
                snapshot.distance.unwrap_or(0.0)
            );
            return Ok(Outcome::Obstacle);
        }

        match (snapshot.left_on_line, snapshot.right_on_line) {
            (true, true) => drive.forward(self.config.speeds.normal)?,
            (true, false) => drive.curve_left(self.config.speeds.normal)?,
            (false, true) => drive.curve_right(self.config.speeds.normal)?,
            (false, false) => {
                // Both sensors off the line: creep forward and report it
                drive.forward(self.config.speeds.slow)?;
                log::debug!("Line lost, creeping forward");
                return Ok(Outcome::Lost);
            }
        }

        Ok(Outcome::Continue)
    }

    /// Follow a colored line using the color sensor.
    ///
    /// A *recognized* color other than the target means a zone boundary
    /// (stop, report found); *no* color means the line is lost (creep and
    /// count). The two cases escalate differently on purpose.
    pub fn follow_color_line(
        &mut self,
        snapshot: &SensorSnapshot,
        target: Color,
        drive: &mut dyn DriveMotor,
    ) -> Result<Outcome> {
        if snapshot.obstacle_detected {
            drive.stop()?;
            log::info!(
                "Obstacle at {:.1}cm, stopping",
                snapshot.distance.unwrap_or(0.0)
            );
            return Ok(Outcome::Obstacle);
        }

        if snapshot.detected_color == target {
            drive.forward(self.config.speeds.normal)?;
            self.state.count = 0;
            return Ok(Outcome::Continue);
        }

        if snapshot.detected_color != Color::None {
            drive.stop()?;
            log::info!(
                "Zone boundary: {} while following {}",
                snapshot.detected_color,
                target
            );
            return Ok(Outcome::TargetFound);
        }

        // No color under the sensor: creep forward and count the miss
        drive.forward(self.config.speeds.slow)?;
        self.state.count += 1;

        if self.state.count > self.config.search.color_lost_limit {
            log::debug!("Color track lost after {} cycles", self.state.count);
            return Ok(Outcome::Lost);
        }

        Ok(Outcome::Continue)
    }

    /// Home in on the center of nested color rings.
    ///
    /// Probes forward for a short blocking interval, then checks whether the
    /// snapshot's color changed relative to the previous cycle - a change
    /// into any recognized color means progress into an inner ring. When
    /// stuck, alternates left/right probe turns to bound wasted motion in
    /// one direction.
    pub fn navigate_to_center(
        &mut self,
        snapshot: &SensorSnapshot,
        drive: &mut dyn DriveMotor,
        clock: &dyn Clock,
    ) -> Result<Outcome> {
        drive.forward(self.config.speeds.slow)?;
        clock.sleep(Duration::from_millis(self.config.timing.probe_advance_ms));

        if snapshot.detected_color != snapshot.previous_color
            && snapshot.detected_color != Color::None
        {
            self.state.count = 0;
            log::info!("Ring transition: {}", snapshot.detected_color);
            return Ok(Outcome::TargetFound);
        }

        self.state.count += 1;

        if self.state.count > self.config.search.center_probe_limit {
            let speed = self.config.speeds.turn;
            match self.state.direction {
                SearchDirection::Right => drive.turn_right(speed)?,
                SearchDirection::Left => drive.turn_left(speed)?,
            }
            clock.sleep(Duration::from_millis(self.config.timing.probe_turn_ms));
            drive.stop()?;

            log::debug!(
                "Center probe {:?} exhausted, sweeping {:?}",
                self.state.direction,
                self.state.direction.flip()
            );
            self.state.direction = self.state.direction.flip();
            self.state.count = 0;
        }

        Ok(Outcome::Continue)
    }

    /// Sweep for the line within a bounded time budget.
    ///
    /// Returns `true` as soon as either reflectance sensor makes line
    /// contact, `false` when the budget expires. Alternates probe turns
    /// left/right between samples, flipping [`SearchState::direction`]
    /// each time.
    pub fn search_for_line(
        &mut self,
        sensors: &mut dyn SensorHub,
        drive: &mut dyn DriveMotor,
        clock: &dyn Clock,
    ) -> Result<bool> {
        let budget = Duration::from_millis(self.config.search.line_search_budget_ms);
        let start = clock.now();
        let mut previous = Color::None;

        while clock.now() - start < budget {
            let snapshot = sensors.read_all(previous)?;
            previous = snapshot.detected_color;

            if snapshot.left_on_line || snapshot.right_on_line {
                log::info!("Line reacquired after {:?}", clock.now() - start);
                return Ok(true);
            }

            let speed = self.config.speeds.turn;
            match self.state.direction {
                SearchDirection::Right => drive.turn_right(speed)?,
                SearchDirection::Left => drive.turn_left(speed)?,
            }
            clock.sleep(Duration::from_millis(self.config.timing.probe_turn_ms));
            drive.stop()?;

            self.state.direction = self.state.direction.flip();
        }

        log::warn!("Line search exhausted {:?} budget", budget);
        Ok(false)
    }

    /// Execute an open-loop timed turn.
    ///
    /// Duration is proportional to the calibrated 90-degree constant;
    /// positive degrees pivot right, negative pivot left. Accuracy depends
    /// entirely on the calibration - no angular feedback is read.
    pub fn turn(
        &self,
        drive: &mut dyn DriveMotor,
        clock: &dyn Clock,
        degrees: i16,
        speed: u8,
    ) -> Result<()> {
        let duration_ms = u64::from(degrees.unsigned_abs()) * self.config.timing.turn_90_ms / 90;

        if degrees > 0 {
            drive.turn_right(speed)?;
        } else {
            drive.turn_left(speed)?;
        }
        log::debug!("Timed turn {}deg ({}ms)", degrees, duration_ms);

        clock.sleep(Duration::from_millis(duration_ms));
        drive.stop()?;
        clock.sleep(Duration::from_millis(self.config.timing.turn_settle_ms));

        Ok(())
    }
}
