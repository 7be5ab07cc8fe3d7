//! Per-cycle aggregated sensor readings

use crate::config::NavConfig;
use crate::perception::color::{classify, Color};

/// Raw color sensor channel readings (periods; lower = stronger reflectance)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelFreqs {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl ChannelFreqs {
    pub fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }
}

/// One instant's aggregated sensor readings
///
/// Created fresh each decision cycle by the acquisition layer and read-only
/// to the engine. `previous_color` is threaded through by the caller, not
/// remembered by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorSnapshot {
    /// Forward range in centimeters; `None` means no echo within timeout
    pub distance: Option<f32>,

    /// True iff the range reading is positive and below the obstacle
    /// threshold
    pub obstacle_detected: bool,

    /// Raw color channel readings
    pub frequencies: ChannelFreqs,

    /// Classification of `frequencies`
    pub detected_color: Color,

    /// The preceding cycle's `detected_color`
    pub previous_color: Color,

    /// Left reflectance sensor sees the line
    pub left_on_line: bool,

    /// Right reflectance sensor sees the line
    pub right_on_line: bool,
}

impl SensorSnapshot {
    /// Assemble a snapshot from raw readings.
    ///
    /// Derives `obstacle_detected` and `detected_color` so every
    /// acquisition path (hardware or mock) applies the same thresholds.
    pub fn from_readings(
        distance: Option<f32>,
        frequencies: ChannelFreqs,
        left_on_line: bool,
        right_on_line: bool,
        previous_color: Color,
        config: &NavConfig,
    ) -> Self {
        let obstacle_detected = matches!(
            distance,
            Some(d) if d > 0.0 && d < config.distances.obstacle_cm
        );
        let detected_color = classify(
            frequencies.red,
            frequencies.green,
            frequencies.blue,
            &config.color,
        );

        Self {
            distance,
            obstacle_detected,
            frequencies,
            detected_color,
            previous_color,
            left_on_line,
            right_on_line,
        }
    }
}
