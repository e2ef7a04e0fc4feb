//! Integration test: the timed phase sequence end to end.

use relact_common::relay::{ChannelPattern, Level};
use relact_control::MotionState::*;
use std::time::Duration;

use super::{CH1_PIN, CH2_PIN, Rig};

#[test]
fn full_cycle_then_restart_without_initial_retract() {
    let rig = Rig::new();
    rig.start();
    assert_eq!(rig.state(), InitialRetracting);
    assert_eq!(rig.lines(), ChannelPattern::RETRACT);

    rig.step(Duration::from_secs(5));
    assert_eq!(rig.state(), Extending);
    assert_eq!(rig.lines(), ChannelPattern::EXTEND);
    assert_eq!(rig.ctrl.status().cycles, 1);

    rig.step(Duration::from_secs(3));
    assert_eq!(rig.state(), Idling);
    assert_eq!(rig.lines(), ChannelPattern::IDLE);

    rig.step(Duration::from_millis(100));
    assert_eq!(rig.state(), Retracting);
    assert_eq!(rig.lines(), ChannelPattern::RETRACT);

    rig.step(Duration::from_secs(3));
    assert_eq!(rig.state(), Waiting);
    assert_eq!(rig.lines(), ChannelPattern::RETRACT);

    rig.step(Duration::from_secs(10));
    assert_eq!(rig.state(), Extending);
    assert_eq!(rig.ctrl.status().cycles, 2);

    rig.ctrl.stop().unwrap();
}

#[test]
fn phase_does_not_end_early() {
    let rig = Rig::new();
    rig.start();

    rig.step(Duration::from_millis(4999));
    assert_eq!(rig.state(), InitialRetracting);
    rig.step(Duration::from_millis(1));
    assert_eq!(rig.state(), Extending);

    rig.step(Duration::from_millis(2999));
    assert_eq!(rig.state(), Extending);

    rig.ctrl.stop().unwrap();
}

#[test]
fn lines_always_match_motion_state() {
    let rig = Rig::new();
    rig.start();
    for _ in 0..12 {
        let status = rig.ctrl.status();
        assert_eq!(status.channels, status.state.pattern(), "in {}", status.state);
        assert_eq!(rig.lines(), status.channels);
        rig.finish_phase();
    }
    rig.ctrl.stop().unwrap();
    assert_eq!(rig.lines(), ChannelPattern::RETRACT);
}

#[test]
fn extend_writes_channel_one_first() {
    let rig = Rig::new();
    rig.start();
    rig.probe.clear_history();

    rig.step(Duration::from_secs(5));
    assert_eq!(
        rig.probe.history(),
        vec![(CH1_PIN, Level::Low), (CH2_PIN, Level::Low)]
    );

    rig.ctrl.stop().unwrap();
}

#[test]
fn waiting_entry_writes_nothing() {
    let rig = Rig::new();
    rig.start();
    rig.step(Duration::from_secs(5));
    rig.step(Duration::from_secs(3));
    rig.step(Duration::from_millis(100));
    rig.probe.clear_history();

    rig.step(Duration::from_secs(3));
    assert_eq!(rig.state(), Waiting);
    assert!(rig.probe.history().is_empty());

    rig.ctrl.stop().unwrap();
}
