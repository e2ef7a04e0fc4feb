//! Integration test: relay faults end the run and stick until restart.

use relact_common::relay::ChannelPattern;
use relact_control::{ControlError, MotionState};
use std::time::Duration;

use super::{Rig, SETTLE, wait_for};

#[test]
fn fault_during_extend_stops_and_de_energizes() {
    let rig = Rig::new();
    rig.start();
    rig.step(Duration::from_secs(5));
    assert_eq!(rig.state(), MotionState::Extending);

    // The write entering Idling fails; the teardown write succeeds.
    rig.probe.fail_next_writes(1);
    rig.clock.advance(Duration::from_secs(3));
    assert!(wait_for(SETTLE, || !rig.ctrl.is_running()));

    let status = rig.ctrl.status();
    assert_eq!(status.state, MotionState::Stopped);
    let fault = status.fault.expect("fault recorded");
    assert!(fault.contains("injected fault"), "{fault}");
    assert_eq!(status.channels, ChannelPattern::RETRACT);
    assert_eq!(rig.lines(), ChannelPattern::RETRACT);
    assert_eq!(rig.clock.sleeping(), 0);
}

#[test]
fn fault_sticks_until_next_start() {
    let rig = Rig::new();
    rig.start();
    rig.probe.fail_next_writes(1);
    rig.clock.advance(Duration::from_secs(5));
    assert!(wait_for(SETTLE, || !rig.ctrl.is_running()));

    // Still reported after unrelated commands.
    rig.ctrl.set_wait_seconds(3.0).unwrap();
    assert_eq!(rig.ctrl.stop(), Err(ControlError::NotRunning));
    assert!(rig.ctrl.status().fault.is_some());

    rig.start();
    let status = rig.ctrl.status();
    assert!(status.fault.is_none());
    assert!(status.running);
    assert_eq!(status.cycles, 0);
    rig.ctrl.stop().unwrap();
}

#[test]
fn failed_teardown_still_stops() {
    let rig = Rig::new();
    rig.start();
    rig.step(Duration::from_secs(5));

    rig.probe.fail_pin(super::CH1_PIN);
    let err = rig.ctrl.stop().unwrap_err();
    assert!(matches!(err, ControlError::HardwareFault(_)));

    let status = rig.ctrl.status();
    assert_eq!(status.state, MotionState::Stopped);
    assert!(!status.running);
    assert!(status.fault.is_some());

    rig.probe.heal();
    rig.start();
    assert_eq!(rig.lines(), ChannelPattern::RETRACT);
    rig.ctrl.stop().unwrap();
}
