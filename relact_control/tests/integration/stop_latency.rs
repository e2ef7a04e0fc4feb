//! Integration test: stop is prompt and final.

use relact_common::relay::ChannelPattern;
use relact_control::{ControlError, MotionState};
use std::time::{Duration, Instant};

use super::Rig;

#[test]
fn stop_while_waiting_is_prompt() {
    let rig = Rig::new();
    rig.start();
    rig.step(Duration::from_secs(5));
    rig.step(Duration::from_secs(3));
    rig.step(Duration::from_millis(100));
    rig.step(Duration::from_secs(3));
    assert_eq!(rig.state(), MotionState::Waiting);

    // The clock is never advanced again; only the stop signal can end the wait.
    let started = Instant::now();
    rig.ctrl.stop().unwrap();
    assert!(started.elapsed() < Duration::from_millis(50));

    let status = rig.ctrl.status();
    assert_eq!(status.state, MotionState::Stopped);
    assert!(!status.running);
    assert_eq!(status.channels, ChannelPattern::RETRACT);
    assert_eq!(rig.clock.sleeping(), 0);
}

#[test]
fn stop_in_every_phase_de_energizes() {
    for phases in 0..5 {
        let rig = Rig::new();
        rig.start();
        for _ in 0..phases {
            rig.finish_phase();
        }
        let stopped_in = rig.state();

        rig.ctrl.stop().unwrap();
        assert_eq!(rig.state(), MotionState::Stopped, "stop from {stopped_in}");
        assert_eq!(rig.lines(), ChannelPattern::RETRACT, "stop from {stopped_in}");
    }
}

#[test]
fn no_writes_after_stop_returns() {
    let rig = Rig::new();
    rig.start();
    rig.step(Duration::from_secs(5));
    rig.ctrl.stop().unwrap();
    rig.probe.clear_history();

    rig.clock.advance(Duration::from_secs(60));
    std::thread::sleep(Duration::from_millis(20));
    assert!(rig.probe.history().is_empty());
    assert_eq!(rig.state(), MotionState::Stopped);
}

#[test]
fn stop_without_run_is_rejected() {
    let rig = Rig::new();
    assert_eq!(rig.ctrl.stop(), Err(ControlError::NotRunning));
    assert!(rig.probe.history().is_empty());
}
