//! Host-side clock and frame pump.
//!
//! The pump thread turns each tick request from the accumulator into one
//! `AppOp::Pump` message, one frame interval later.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use clock_core::{Clock, Scheduler};

use crate::AppOp;

/// Monotonic clock measured from process start.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpOp {
    Frame,
    Quit,
}

pub struct FrameScheduler {
    pump: Sender<PumpOp>,
}

impl FrameScheduler {
    pub fn shutdown(&self) {
        self.pump.send(PumpOp::Quit).ok();
    }
}

impl Scheduler for FrameScheduler {
    fn schedule_next_tick(&self) {
        if self.pump.send(PumpOp::Frame).is_err() {
            log::error!("frame pump is gone, tick dropped");
        }
    }
}

/// Start the pump thread. Pump messages go to `main`.
pub fn spawn_pump(interval: Duration, main: Sender<AppOp>) -> (FrameScheduler, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || pump_thread(rx, main, interval));
    (FrameScheduler { pump: tx }, handle)
}

fn pump_thread(requests: Receiver<PumpOp>, main: Sender<AppOp>, interval: Duration) {
    log::debug!("frame pump running at {:?}", interval);
    loop {
        match requests.recv() {
            Ok(PumpOp::Frame) => {
                thread::sleep(interval);
                if main.send(AppOp::Pump).is_err() {
                    break;
                }
            }
            Ok(PumpOp::Quit) | Err(_) => break,
        }
    }
    log::debug!("frame pump stopped");
}
