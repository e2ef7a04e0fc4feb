//! Integration test: start/stop guards and concurrent callers.

use relact_control::{ControlError, MotionState};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use super::Rig;

#[test]
fn second_start_and_second_stop_are_rejected() {
    let rig = Rig::new();
    rig.start();
    assert_eq!(rig.ctrl.start(), Err(ControlError::AlreadyRunning));
    assert_eq!(rig.state(), MotionState::InitialRetracting);

    rig.ctrl.stop().unwrap();
    assert_eq!(rig.ctrl.stop(), Err(ControlError::NotRunning));
}

#[test]
fn concurrent_starts_spawn_one_runner() {
    let rig = Rig::new();
    let wins = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ctrl = Arc::clone(&rig.ctrl);
            let wins = Arc::clone(&wins);
            thread::spawn(move || match ctrl.start() {
                Ok(()) => {
                    wins.fetch_add(1, Ordering::SeqCst);
                }
                Err(e) => assert_eq!(e, ControlError::AlreadyRunning),
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(wins.load(Ordering::SeqCst), 1);
    assert!(rig.clock.settle(super::SETTLE));
    assert_eq!(rig.clock.sleeping(), 1);
    rig.ctrl.stop().unwrap();
}

#[test]
fn mixed_start_stop_keeps_invariants() {
    let rig = Rig::new();
    let done = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let watcher = {
        let ctrl = Arc::clone(&rig.ctrl);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::SeqCst) {
                let status = ctrl.status();
                assert_eq!(status.channels, status.state.pattern(), "in {}", status.state);
                assert_eq!(status.running, status.state.is_active());
            }
        })
    };

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let ctrl = Arc::clone(&rig.ctrl);
            let clock = Arc::clone(&rig.clock);
            thread::spawn(move || {
                for n in 0..50 {
                    if (i + n) % 2 == 0 {
                        let _ = ctrl.start();
                    } else {
                        let _ = ctrl.stop();
                    }
                    clock.advance(Duration::from_millis(700));
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }
    done.store(true, Ordering::SeqCst);
    watcher.join().unwrap();

    let _ = rig.ctrl.stop();
    assert_eq!(rig.state(), MotionState::Stopped);
    assert_eq!(rig.clock.sleeping(), 0);
}
