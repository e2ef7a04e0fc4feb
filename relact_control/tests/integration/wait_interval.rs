//! Integration test: live wait interval changes.

use relact_common::consts::MAX_PHASE_SECS;
use relact_control::clock::Clock;
use relact_control::{ControlError, MotionState};
use std::time::Duration;

use super::Rig;

/// Run from start to the first `Waiting`.
fn to_waiting(rig: &Rig) {
    rig.step(Duration::from_secs(5));
    rig.step(Duration::from_secs(3));
    rig.step(Duration::from_millis(100));
    rig.step(Duration::from_secs(3));
    assert_eq!(rig.state(), MotionState::Waiting);
}

#[test]
fn change_during_extend_applies_to_next_wait() {
    let rig = Rig::new();
    rig.start();
    rig.step(Duration::from_secs(5));
    assert_eq!(rig.state(), MotionState::Extending);
    let extend_deadline = rig.clock.next_deadline();

    rig.ctrl.set_wait_interval(Duration::from_secs(5)).unwrap();
    // Current phase keeps its deadline.
    assert_eq!(rig.clock.next_deadline(), extend_deadline);

    rig.step(Duration::from_secs(3));
    rig.step(Duration::from_millis(100));
    rig.step(Duration::from_secs(3));
    assert_eq!(rig.state(), MotionState::Waiting);
    assert_eq!(
        rig.clock.next_deadline(),
        Some(rig.clock.now() + Duration::from_secs(5))
    );

    rig.step(Duration::from_millis(4999));
    assert_eq!(rig.state(), MotionState::Waiting);
    rig.step(Duration::from_millis(1));
    assert_eq!(rig.state(), MotionState::Extending);

    rig.ctrl.stop().unwrap();
}

#[test]
fn change_during_wait_is_not_retroactive() {
    let rig = Rig::new();
    rig.start();
    to_waiting(&rig);

    rig.ctrl.set_wait_seconds(1.0).unwrap();
    rig.step(Duration::from_secs(1));
    assert_eq!(rig.state(), MotionState::Waiting, "current wait keeps 10 s");

    rig.step(Duration::from_secs(9));
    assert_eq!(rig.state(), MotionState::Extending);

    rig.finish_phase();
    rig.finish_phase();
    rig.finish_phase();
    assert_eq!(rig.state(), MotionState::Waiting);
    assert_eq!(
        rig.clock.next_deadline(),
        Some(rig.clock.now() + Duration::from_secs(1))
    );

    rig.ctrl.stop().unwrap();
}

#[test]
fn rejected_values_leave_wait_unchanged() {
    let rig = Rig::new();
    rig.ctrl.set_wait_seconds(7.0).unwrap();

    assert!(matches!(
        rig.ctrl.set_wait_interval(Duration::ZERO),
        Err(ControlError::InvalidArgument(_))
    ));
    assert!(matches!(
        rig.ctrl.set_wait_seconds(-3.0),
        Err(ControlError::InvalidArgument(_))
    ));
    assert_eq!(rig.ctrl.status().wait(), Duration::from_secs(7));
}

#[test]
fn wait_survives_restart() {
    let rig = Rig::new();
    rig.ctrl.set_wait_seconds(2.0).unwrap();
    rig.start();
    rig.ctrl.stop().unwrap();
    rig.start();
    to_waiting_with(&rig, Duration::from_secs(2));
    rig.ctrl.stop().unwrap();
}

fn to_waiting_with(rig: &Rig, wait: Duration) {
    to_waiting(rig);
    assert_eq!(rig.clock.next_deadline(), Some(rig.clock.now() + wait));
}

#[test]
fn oversized_wait_rejected_after_long_uptime() {
    let rig = Rig::new();
    rig.clock.advance(Duration::from_secs(3600));

    let err = rig.ctrl.set_wait_seconds(1.844674407370955e19).unwrap_err();
    assert!(matches!(err, ControlError::InvalidArgument(_)));
    assert_eq!(rig.ctrl.status().wait(), Duration::from_secs(10));
}

#[test]
fn longest_wait_keeps_cycling() {
    let rig = Rig::new();
    rig.clock.advance(Duration::from_secs(3600));
    let max = Duration::from_secs(MAX_PHASE_SECS);
    rig.ctrl.set_wait_seconds(MAX_PHASE_SECS as f64).unwrap();

    rig.start();
    to_waiting_with(&rig, max);

    rig.step(max - Duration::from_secs(1));
    assert_eq!(rig.state(), MotionState::Waiting);
    rig.step(Duration::from_secs(1));
    assert_eq!(rig.state(), MotionState::Extending);
    let status = rig.ctrl.status();
    assert!(status.running);
    assert!(status.fault.is_none());
    assert_eq!(status.cycles, 2);

    rig.ctrl.stop().unwrap();
}
