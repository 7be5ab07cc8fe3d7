//! Configuration loading for MargaNav
//!
//! All calibration constants in one TOML-loadable structure so the robot can
//! be re-tuned for a new course surface without code changes.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NavConfig {
    #[serde(default)]
    pub speeds: SpeedConfig,
    #[serde(default)]
    pub distances: DistanceConfig,
    #[serde(default)]
    pub color: ColorConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Named motor speeds (0-255 PWM scale)
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SpeedConfig {
    /// Precision movements (default: 100)
    #[serde(default = "default_speed_slow")]
    pub slow: u8,

    /// Standard operation (default: 150)
    #[serde(default = "default_speed_normal")]
    pub normal: u8,

    /// Pivot turns (default: 120)
    #[serde(default = "default_speed_turn")]
    pub turn: u8,
}

/// Distance thresholds in centimeters
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DistanceConfig {
    /// Obstacle detection range (default: 15.0)
    #[serde(default = "default_obstacle_cm")]
    pub obstacle_cm: f32,

    /// Wall-following target distance (default: 10.0)
    #[serde(default = "default_wall_hug_cm")]
    pub wall_hug_cm: f32,

    /// Below `wall_hug_cm - hug_near_margin_cm` the robot curves away
    /// from the wall (default: 3.0)
    #[serde(default = "default_hug_near_margin_cm")]
    pub hug_near_margin_cm: f32,

    /// Up to `wall_hug_cm + hug_far_margin_cm` the robot drives straight
    /// (default: 5.0)
    #[serde(default = "default_hug_far_margin_cm")]
    pub hug_far_margin_cm: f32,

    /// Beyond `wall_hug_cm + hug_clear_margin_cm` the wall is considered
    /// passed (default: 10.0)
    #[serde(default = "default_hug_clear_margin_cm")]
    pub hug_clear_margin_cm: f32,
}

/// Color classifier thresholds
///
/// Readings are photodiode periods: lower value = stronger reflectance
/// on that channel.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ColorConfig {
    /// All channels above this = black surface (default: 200)
    #[serde(default = "default_black_min")]
    pub black_min: u16,

    /// All channels below this = white surface (default: 50)
    #[serde(default = "default_white_max")]
    pub white_max: u16,

    /// Minimum separation between the dominant channel and the other two
    /// (default: 20)
    #[serde(default = "default_margin")]
    pub margin: u16,

    /// Maximum reading for the dominant channel to still count as a hue
    /// (default: 150)
    #[serde(default = "default_hue_max")]
    pub hue_max: u16,
}

/// Timing constants in milliseconds
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Control loop period (default: 50, ~20 Hz)
    #[serde(default = "default_loop_period_ms")]
    pub loop_period_ms: u64,

    /// Calibrated duration of a 90-degree pivot (default: 500)
    #[serde(default = "default_turn_90_ms")]
    pub turn_90_ms: u64,

    /// Settle delay after a timed turn (default: 50)
    #[serde(default = "default_turn_settle_ms")]
    pub turn_settle_ms: u64,

    /// Settle delay before starting the avoidance maneuver (default: 100)
    #[serde(default = "default_pre_maneuver_settle_ms")]
    pub pre_maneuver_settle_ms: u64,

    /// Forward advance past the obstacle edge during avoidance (default: 800)
    #[serde(default = "default_clear_advance_ms")]
    pub clear_advance_ms: u64,

    /// Forward probe interval in the center-seek policy (default: 100)
    #[serde(default = "default_probe_advance_ms")]
    pub probe_advance_ms: u64,

    /// Probe turn duration for search alternation (default: 200)
    #[serde(default = "default_probe_turn_ms")]
    pub probe_turn_ms: u64,

    /// Distance polling cadence during wall-hug (default: 50)
    #[serde(default = "default_wall_hug_period_ms")]
    pub wall_hug_period_ms: u64,

    /// Pause between claw sequencing steps (default: 100)
    #[serde(default = "default_claw_pause_ms")]
    pub claw_pause_ms: u64,
}

/// Iteration and time caps for the search behaviors
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Consecutive no-color cycles before color following reports lost
    /// (default: 10)
    #[serde(default = "default_color_lost_limit")]
    pub color_lost_limit: u32,

    /// Consecutive no-change cycles before center seek probes sideways
    /// (default: 5)
    #[serde(default = "default_center_probe_limit")]
    pub center_probe_limit: u32,

    /// Maximum wall-hug iterations (default: 30)
    #[serde(default = "default_wall_hug_max_steps")]
    pub wall_hug_max_steps: usize,

    /// Time budget for the line search in milliseconds (default: 2000)
    #[serde(default = "default_line_search_budget_ms")]
    pub line_search_budget_ms: u64,
}

// Default value functions
fn default_speed_slow() -> u8 {
    100
}
fn default_speed_normal() -> u8 {
    150
}
fn default_speed_turn() -> u8 {
    120
}
fn default_obstacle_cm() -> f32 {
    15.0
}
fn default_wall_hug_cm() -> f32 {
    10.0
}
fn default_hug_near_margin_cm() -> f32 {
    3.0
}
fn default_hug_far_margin_cm() -> f32 {
    5.0
}
fn default_hug_clear_margin_cm() -> f32 {
    10.0
}
fn default_black_min() -> u16 {
    200
}
fn default_white_max() -> u16 {
    50
}
fn default_margin() -> u16 {
    20
}
fn default_hue_max() -> u16 {
    150
}
fn default_loop_period_ms() -> u64 {
    50
}
fn default_turn_90_ms() -> u64 {
    500
}
fn default_turn_settle_ms() -> u64 {
    50
}
fn default_pre_maneuver_settle_ms() -> u64 {
    100
}
fn default_clear_advance_ms() -> u64 {
    800
}
fn default_probe_advance_ms() -> u64 {
    100
}
fn default_probe_turn_ms() -> u64 {
    200
}
fn default_wall_hug_period_ms() -> u64 {
    50
}
fn default_claw_pause_ms() -> u64 {
    100
}
fn default_color_lost_limit() -> u32 {
    10
}
fn default_center_probe_limit() -> u32 {
    5
}
fn default_wall_hug_max_steps() -> usize {
    30
}
fn default_line_search_budget_ms() -> u64 {
    2000
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            slow: default_speed_slow(),
            normal: default_speed_normal(),
            turn: default_speed_turn(),
        }
    }
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            obstacle_cm: default_obstacle_cm(),
            wall_hug_cm: default_wall_hug_cm(),
            hug_near_margin_cm: default_hug_near_margin_cm(),
            hug_far_margin_cm: default_hug_far_margin_cm(),
            hug_clear_margin_cm: default_hug_clear_margin_cm(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            black_min: default_black_min(),
            white_max: default_white_max(),
            margin: default_margin(),
            hue_max: default_hue_max(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loop_period_ms: default_loop_period_ms(),
            turn_90_ms: default_turn_90_ms(),
            turn_settle_ms: default_turn_settle_ms(),
            pre_maneuver_settle_ms: default_pre_maneuver_settle_ms(),
            clear_advance_ms: default_clear_advance_ms(),
            probe_advance_ms: default_probe_advance_ms(),
            probe_turn_ms: default_probe_turn_ms(),
            wall_hug_period_ms: default_wall_hug_period_ms(),
            claw_pause_ms: default_claw_pause_ms(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            color_lost_limit: default_color_lost_limit(),
            center_probe_limit: default_center_probe_limit(),
            wall_hug_max_steps: default_wall_hug_max_steps(),
            line_search_budget_ms: default_line_search_budget_ms(),
        }
    }
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: NavConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
