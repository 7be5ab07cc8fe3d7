//! Scripted sensor hub mock

use crate::config::NavConfig;
use crate::error::Result;
use crate::hal::SensorHub;
use crate::perception::{ChannelFreqs, Color, SensorSnapshot};
use std::collections::VecDeque;

/// One scripted instant of raw sensor readings
///
/// Thresholding into a [`SensorSnapshot`] happens at read time through the
/// same [`SensorSnapshot::from_readings`] path the hardware layer uses.
#[derive(Clone, Copy, Debug)]
pub struct ScriptedReading {
    pub distance: Option<f32>,
    pub frequencies: ChannelFreqs,
    pub left_on_line: bool,
    pub right_on_line: bool,
}

impl ScriptedReading {
    /// Nothing under any sensor: no echo, ambiguous color, off the line
    pub fn quiescent() -> Self {
        Self {
            distance: None,
            frequencies: ChannelFreqs::new(160, 160, 160),
            left_on_line: false,
            right_on_line: false,
        }
    }

    /// Line sensors only
    pub fn line(left: bool, right: bool) -> Self {
        Self {
            left_on_line: left,
            right_on_line: right,
            ..Self::quiescent()
        }
    }

    /// Color channels only
    pub fn color(red: u16, green: u16, blue: u16) -> Self {
        Self {
            frequencies: ChannelFreqs::new(red, green, blue),
            ..Self::quiescent()
        }
    }

    /// Ranging sensor only
    pub fn range(distance_cm: f32) -> Self {
        Self {
            distance: Some(distance_cm),
            ..Self::quiescent()
        }
    }
}

/// Sensor hub mock replaying scripted readings
///
/// `read_all` consumes the reading queue; `read_distance` consumes a
/// separate distance queue so blocking maneuvers (wall-hug) can be scripted
/// independently of the decision-cycle snapshots. Exhausted queues yield
/// quiescent readings, never errors.
pub struct ScriptedSensors {
    config: NavConfig,
    readings: VecDeque<ScriptedReading>,
    distances: VecDeque<Option<f32>>,
}

impl ScriptedSensors {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            readings: VecDeque::new(),
            distances: VecDeque::new(),
        }
    }

    /// Append one scripted snapshot reading
    pub fn push_reading(&mut self, reading: ScriptedReading) {
        self.readings.push_back(reading);
    }

    /// Append a line-sensors-only reading
    pub fn push_line_reading(&mut self, left: bool, right: bool) {
        self.push_reading(ScriptedReading::line(left, right));
    }

    /// Append a color-channels-only reading
    pub fn push_color_reading(&mut self, red: u16, green: u16, blue: u16) {
        self.push_reading(ScriptedReading::color(red, green, blue));
    }

    /// Append a reading for the standalone distance queue
    pub fn push_distance(&mut self, distance_cm: Option<f32>) {
        self.distances.push_back(distance_cm);
    }

    /// Snapshot readings not yet consumed
    pub fn remaining_readings(&self) -> usize {
        self.readings.len()
    }

    /// Distance readings not yet consumed
    pub fn remaining_distances(&self) -> usize {
        self.distances.len()
    }
}

impl SensorHub for ScriptedSensors {
    fn read_all(&mut self, previous: Color) -> Result<SensorSnapshot> {
        let reading = self
            .readings
            .pop_front()
            .unwrap_or_else(ScriptedReading::quiescent);

        Ok(SensorSnapshot::from_readings(
            reading.distance,
            reading.frequencies,
            reading.left_on_line,
            reading.right_on_line,
            previous,
            &self.config,
        ))
    }

    fn read_distance(&mut self) -> Result<Option<f32>> {
        Ok(self.distances.pop_front().unwrap_or(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_readings_threshold_like_hardware() {
        let mut sensors = ScriptedSensors::new(NavConfig::default());
        sensors.push_reading(ScriptedReading::range(10.0));
        sensors.push_color_reading(60, 120, 130);

        let snap = sensors.read_all(Color::None).unwrap();
        assert!(snap.obstacle_detected);
        assert_eq!(snap.distance, Some(10.0));

        let snap = sensors.read_all(Color::None).unwrap();
        assert_eq!(snap.detected_color, Color::Red);
        assert!(!snap.obstacle_detected);
    }

    #[test]
    fn test_exhausted_script_goes_quiescent() {
        let mut sensors = ScriptedSensors::new(NavConfig::default());

        let snap = sensors.read_all(Color::Red).unwrap();
        assert_eq!(snap.distance, None);
        assert_eq!(snap.detected_color, Color::None);
        assert_eq!(snap.previous_color, Color::Red);
        assert!(!snap.left_on_line && !snap.right_on_line);

        assert_eq!(sensors.read_distance().unwrap(), None);
    }
}
