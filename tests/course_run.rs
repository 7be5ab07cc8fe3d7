//! Course Scenario Tests
//!
//! End-to-end runs of the decision engine against the scripted mock rig,
//! on virtual time. Covers the caller-visible contracts:
//! - Line following drives forward on full contact and reports obstacles
//! - Color following distinguishes "no signal" (creep) from "wrong signal"
//!   (zone boundary)
//! - The avoidance maneuver issues its fixed command sequence, spends
//!   exactly its open-loop time budget, and reports the final forward range
//! - Line search recovers contact mid-sweep
//!
//! Run with: `cargo test --test course_run`

use approx::assert_relative_eq;
use marga_nav::config::NavConfig;
use marga_nav::devices::mock::{DriveCommand, MockClock, MockDrive, ScriptedSensors};
use marga_nav::hal::SensorHub;
use marga_nav::nav::{Navigator, Outcome};
use marga_nav::perception::Color;
use std::time::Duration;

fn rig() -> (Navigator, MockDrive, MockClock, ScriptedSensors) {
    let clock = MockClock::new();
    let config = NavConfig::default();
    let nav = Navigator::new(config.clone(), &clock);
    (nav, MockDrive::new(), clock, ScriptedSensors::new(config))
}

#[test]
fn line_follow_full_contact_drives_forward() {
    let (nav, mut drive, _clock, mut sensors) = rig();
    sensors.push_line_reading(true, true);

    let snapshot = sensors.read_all(Color::None).unwrap();
    let outcome = nav.follow_black_line(&snapshot, &mut drive).unwrap();

    assert_eq!(outcome, Outcome::Continue);
    assert_eq!(drive.last(), Some(DriveCommand::Forward(150)));
}

#[test]
fn color_follow_on_target_resets_search_count() {
    let (mut nav, mut drive, _clock, mut sensors) = rig();
    sensors.push_reading(marga_nav::devices::mock::ScriptedReading::quiescent());
    sensors.push_color_reading(120, 60, 130); // green

    // One miss first, then the target
    let miss = sensors.read_all(Color::None).unwrap();
    nav.follow_color_line(&miss, Color::Green, &mut drive).unwrap();
    assert_eq!(nav.state().count, 1);

    let hit = sensors.read_all(miss.detected_color).unwrap();
    let outcome = nav.follow_color_line(&hit, Color::Green, &mut drive).unwrap();

    assert_eq!(outcome, Outcome::Continue);
    assert_eq!(nav.state().count, 0);
    assert_eq!(drive.last(), Some(DriveCommand::Forward(150)));
}

#[test]
fn color_follow_other_color_is_zone_boundary() {
    let (mut nav, mut drive, _clock, mut sensors) = rig();
    sensors.push_color_reading(60, 120, 130); // red

    let snapshot = sensors.read_all(Color::None).unwrap();
    let outcome = nav
        .follow_color_line(&snapshot, Color::Green, &mut drive)
        .unwrap();

    assert_eq!(outcome, Outcome::TargetFound);
    assert_eq!(drive.last(), Some(DriveCommand::Stop));
}

#[test]
fn color_follow_reports_lost_on_eleventh_miss() {
    let (mut nav, mut drive, _clock, mut sensors) = rig();
    let mut previous = Color::None;

    // The scripted hub goes quiescent once empty: every read is a miss
    for _ in 0..10 {
        let snapshot = sensors.read_all(previous).unwrap();
        previous = snapshot.detected_color;
        let outcome = nav
            .follow_color_line(&snapshot, Color::Green, &mut drive)
            .unwrap();
        assert_eq!(outcome, Outcome::Continue);
    }

    let snapshot = sensors.read_all(previous).unwrap();
    let outcome = nav
        .follow_color_line(&snapshot, Color::Green, &mut drive)
        .unwrap();
    assert_eq!(outcome, Outcome::Lost);
}

#[test]
fn avoidance_spends_its_open_loop_time_budget() {
    let (nav, mut drive, clock, mut sensors) = rig();

    sensors.push_distance(Some(10.0)); // alongside the flank
    sensors.push_distance(Some(10.0));
    sensors.push_distance(Some(25.0)); // flank ends
    sensors.push_distance(Some(80.0)); // post-maneuver forward check

    let report = nav
        .avoid_obstacle_right(&mut drive, &mut sensors, &clock)
        .unwrap();

    assert_eq!(report.outcome, Outcome::Continue);
    assert_relative_eq!(report.final_distance.unwrap(), 80.0);

    // settle 100 + four timed turns (500+50 each) + two advances (800)
    // + two wall-hug polls (50): 4000ms of open-loop time
    assert_eq!(clock.total_slept(), Duration::from_millis(4000));

    // The maneuver begins by stopping and ends stopped
    assert_eq!(drive.commands().first(), Some(&DriveCommand::Stop));
    assert_eq!(drive.last(), Some(DriveCommand::Stop));
}

#[test]
fn line_search_recovers_contact_mid_sweep() {
    let (mut nav, mut drive, clock, mut sensors) = rig();

    sensors.push_line_reading(false, false);
    sensors.push_line_reading(false, false);
    sensors.push_line_reading(false, true); // contact on the third sample

    let found = nav
        .search_for_line(&mut sensors, &mut drive, &clock)
        .unwrap();

    assert!(found);
    // Two probe sweeps before contact, alternating right then left
    let turns: Vec<_> = drive
        .commands()
        .iter()
        .filter(|c| !matches!(c, DriveCommand::Stop))
        .cloned()
        .collect();
    assert_eq!(
        turns,
        vec![DriveCommand::TurnRight(120), DriveCommand::TurnLeft(120)]
    );
}

#[test]
fn obstacle_interrupts_line_following_and_course_resumes() {
    let (nav, mut drive, clock, mut sensors) = rig();

    sensors.push_line_reading(true, true);
    sensors.push_reading(marga_nav::devices::mock::ScriptedReading {
        distance: Some(12.0),
        frequencies: marga_nav::perception::ChannelFreqs::new(160, 160, 160),
        left_on_line: true,
        right_on_line: true,
    });
    sensors.push_line_reading(true, true);
    sensors.push_distance(Some(30.0)); // wall already clear
    sensors.push_distance(Some(90.0)); // final forward check

    let mut previous = Color::None;
    let mut outcomes = Vec::new();

    for _ in 0..3 {
        let snapshot = sensors.read_all(previous).unwrap();
        previous = snapshot.detected_color;

        let outcome = nav.follow_black_line(&snapshot, &mut drive).unwrap();
        if outcome == Outcome::Obstacle {
            let report = nav
                .avoid_obstacle_right(&mut drive, &mut sensors, &clock)
                .unwrap();
            outcomes.push(report.outcome);
        } else {
            outcomes.push(outcome);
        }
    }

    assert_eq!(
        outcomes,
        vec![Outcome::Continue, Outcome::Continue, Outcome::Continue]
    );
    // The interrupted cycle pivoted right around the box and came back
    assert!(drive
        .commands()
        .contains(&DriveCommand::TurnRight(120)));
    assert_eq!(drive.last(), Some(DriveCommand::Forward(150)));
}
