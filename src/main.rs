//! MargaNav - mission runner for the line-course robot
//!
//! Runs the fixed-rate (~20 Hz) control loop around the navigation decision
//! engine and owns all task switching: line following until an obstacle or
//! a lost line, obstacle circumvention, line search, color-zone following
//! with a claw pickup at the zone boundary, and center seek on the
//! concentric target.
//!
//! Hardware drivers live out of tree; this binary drives the scripted mock
//! rig through a complete demonstration course so the whole decision layer
//! can be exercised without a robot.

use clap::Parser;
use marga_nav::config::NavConfig;
use marga_nav::devices::mock::{
    MockClaw, MockClock, MockDrive, ScriptedReading, ScriptedSensors,
};
use marga_nav::hal::{ClawDriver, Clock, DriveMotor, SensorHub, SystemClock};
use marga_nav::nav::{Navigator, Outcome};
use marga_nav::perception::{ChannelFreqs, Color};
use marga_nav::{Error, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "marga-nav", about = "Navigation decision engine demo run")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum decision cycles before the run aborts
    #[arg(long, default_value_t = 400)]
    max_cycles: u32,

    /// Run on virtual time instead of the wall clock
    #[arg(long)]
    fast: bool,
}

/// High-level task the control loop is currently executing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MissionTask {
    /// Follow the black starting line
    BlackLine,
    /// Follow the colored approach line toward the pickup zone
    ColorLine(Color),
    /// Home in on the concentric delivery target
    CenterSeek,
    Finished,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            log::info!("Using config: {}", path.display());
            NavConfig::load(path)?
        }
        None => NavConfig::default(),
    };

    log::info!("MargaNav v{} starting...", env!("CARGO_PKG_VERSION"));

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Config(format!("Error setting Ctrl-C handler: {}", e)))?;

    // Mock rig loaded with the demonstration course
    let mut sensors = ScriptedSensors::new(config.clone());
    script_demo_course(&mut sensors);
    let mut drive = MockDrive::new();
    let mut claw = MockClaw::new();

    let system_clock = SystemClock;
    let mock_clock = MockClock::new();
    let clock: &dyn Clock = if args.fast { &mock_clock } else { &system_clock };

    let mut navigator = Navigator::new(config.clone(), clock);

    run_mission(
        &mut navigator,
        &mut sensors,
        &mut drive,
        &mut claw,
        clock,
        &config,
        &running,
        args.max_cycles,
    )?;

    log::info!(
        "Mission finished: {} drive commands issued, {} claw moves",
        drive.commands().len(),
        claw.moves().len()
    );
    Ok(())
}

/// Fixed-rate control loop with caller-side task switching
#[allow(clippy::too_many_arguments)]
fn run_mission(
    navigator: &mut Navigator,
    sensors: &mut dyn SensorHub,
    drive: &mut dyn DriveMotor,
    claw: &mut dyn ClawDriver,
    clock: &dyn Clock,
    config: &NavConfig,
    running: &AtomicBool,
    max_cycles: u32,
) -> Result<()> {
    let loop_period = Duration::from_millis(config.timing.loop_period_ms);
    let mut task = MissionTask::BlackLine;
    let mut previous = Color::None;
    let mut cycles = 0u32;

    log::info!("Task: black line following");

    while running.load(Ordering::Relaxed) && task != MissionTask::Finished {
        if cycles >= max_cycles {
            log::warn!("Cycle budget ({}) exhausted, aborting run", max_cycles);
            break;
        }
        cycles += 1;

        let snapshot = sensors.read_all(previous)?;
        previous = snapshot.detected_color;

        match task {
            MissionTask::BlackLine => {
                match navigator.follow_black_line(&snapshot, drive)? {
                    Outcome::Obstacle => {
                        let report = navigator.avoid_obstacle_right(drive, sensors, clock)?;
                        log::info!(
                            "Resuming line, forward range {:?}cm",
                            report.final_distance
                        );
                    }
                    Outcome::Lost => {
                        if !navigator.search_for_line(sensors, drive, clock)? {
                            // End of the black segment: the course hands
                            // over to the colored approach line
                            log::info!("Task: green line following");
                            navigator.reset(clock);
                            task = MissionTask::ColorLine(Color::Green);
                        }
                    }
                    _ => {}
                }
            }
            MissionTask::ColorLine(target) => {
                match navigator.follow_color_line(&snapshot, target, drive)? {
                    Outcome::TargetFound => {
                        log::info!("Pickup zone reached");
                        claw_pickup(claw, clock, config)?;
                        log::info!("Task: center seek");
                        navigator.reset(clock);
                        task = MissionTask::CenterSeek;
                    }
                    Outcome::Obstacle => {
                        navigator.avoid_obstacle_right(drive, sensors, clock)?;
                    }
                    Outcome::Lost => {
                        if !navigator.search_for_line(sensors, drive, clock)? {
                            log::warn!("Color track not recovered, aborting run");
                            break;
                        }
                    }
                    _ => {}
                }
            }
            MissionTask::CenterSeek => {
                if navigator.navigate_to_center(&snapshot, drive, clock)? == Outcome::TargetFound
                    && snapshot.detected_color == Color::Red
                {
                    // Innermost ring: deliver the payload and finish
                    log::info!("Target center reached");
                    claw_drop(claw, clock, config)?;
                    task = MissionTask::Finished;
                }
            }
            MissionTask::Finished => {}
        }

        clock.sleep(loop_period);
    }

    drive.stop()?;
    log::info!("Run complete after {} cycles", cycles);
    Ok(())
}

/// Lower, grab, and lift to the carrying position
fn claw_pickup(claw: &mut dyn ClawDriver, clock: &dyn Clock, config: &NavConfig) -> Result<()> {
    let pause = Duration::from_millis(config.timing.claw_pause_ms);
    claw.arm_down()?;
    clock.sleep(pause);
    claw.close_clamp()?;
    clock.sleep(pause);
    claw.arm_carry()?;
    Ok(())
}

/// Lower, release, and return to the carrying position
fn claw_drop(claw: &mut dyn ClawDriver, clock: &dyn Clock, config: &NavConfig) -> Result<()> {
    let pause = Duration::from_millis(config.timing.claw_pause_ms);
    claw.arm_down()?;
    clock.sleep(pause);
    claw.open_clamp()?;
    clock.sleep(pause);
    claw.arm_carry()?;
    Ok(())
}

/// Load the demonstration course into the scripted rig.
///
/// Course shape: a straight black segment with one drift correction, a box
/// blocking the track (circumvented right with a short wall-hug), the rest
/// of the black segment, hand-over to the green approach line, a red
/// pickup-zone boundary, then concentric rings blue -> red.
fn script_demo_course(sensors: &mut ScriptedSensors) {
    // Straight black segment
    for _ in 0..10 {
        sensors.push_line_reading(true, true);
    }
    // Drifting off to the right; curve back
    for _ in 0..3 {
        sensors.push_line_reading(true, false);
    }
    for _ in 0..4 {
        sensors.push_line_reading(true, true);
    }

    // A box sits on the track
    sensors.push_reading(ScriptedReading {
        distance: Some(12.0),
        frequencies: ChannelFreqs::new(160, 160, 160),
        left_on_line: true,
        right_on_line: true,
    });
    // Flank readings consumed by the wall-hug leg, then the post-maneuver
    // forward check
    sensors.push_distance(Some(9.0));
    sensors.push_distance(Some(10.0));
    sensors.push_distance(Some(11.0));
    sensors.push_distance(Some(24.0));
    sensors.push_distance(Some(120.0));

    // Rest of the black segment
    for _ in 0..6 {
        sensors.push_line_reading(true, true);
    }

    // Segment ends: one off-line cycle triggers the search, which sweeps
    // through quiescent readings and comes up empty
    for _ in 0..12 {
        sensors.push_reading(ScriptedReading::quiescent());
    }

    // Green approach line
    for _ in 0..8 {
        sensors.push_color_reading(120, 60, 130);
    }
    // Red pickup-zone boundary
    sensors.push_color_reading(60, 120, 130);

    // Concentric rings: blue, then the red center
    for _ in 0..3 {
        sensors.push_color_reading(130, 120, 60);
    }
    sensors.push_color_reading(60, 120, 130);
}
