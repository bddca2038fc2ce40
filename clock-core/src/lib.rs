//! Pure timing logic library with no platform dependencies.
//! Testable on host; the binary supplies a real clock and frame pump.
//!
//! [`TimeAccumulator`] keeps an hours/minutes/seconds/hundredths vector and
//! moves it up (stopwatch) or down (countdown) by the wall-clock time that
//! passed between ticks. The host provides "now" through [`Clock`] and
//! delivers the ticks it was asked for through [`Scheduler`].

mod service;
mod time;

use std::time::Duration;

pub use service::{Clock, ManualClock, ManualScheduler, Scheduler};
pub use time::{format, TimeVector};

/// Vector a fresh accumulator starts from: five minutes.
pub const DEFAULT_TIME: TimeVector = TimeVector::new(0, 5, 0, 0.0);

const NANOS_PER_HUNDREDTH: f64 = 10_000_000.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Countdown,
    Stopwatch,
}

impl Mode {
    /// Sign applied to elapsed time.
    pub fn direction(self) -> f64 {
        match self {
            Mode::Countdown => -1.0,
            Mode::Stopwatch => 1.0,
        }
    }

    pub fn toggled(self) -> Mode {
        match self {
            Mode::Countdown => Mode::Stopwatch,
            Mode::Stopwatch => Mode::Countdown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Countdown => "Countdown",
            Mode::Stopwatch => "Stopwatch",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunState {
    Stopped,
    Running,
}

/// What a call to [`TimeAccumulator::step`] did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    /// Not running; a tick that was already in flight when we stopped.
    Idle,
    /// Time moved and the next tick was requested.
    Advanced,
    /// Countdown ran past zero: clamped to zero and stopped.
    Expired,
}

type Observer = Box<dyn FnMut(&str)>;

pub struct TimeAccumulator<C, S> {
    state: RunState,
    mode: Mode,
    time: TimeVector,
    initial: TimeVector,
    reference: Option<Duration>,
    show_hundredths: bool,
    observers: Vec<Observer>,
    clock: C,
    scheduler: S,
}

impl<C: Clock, S: Scheduler> TimeAccumulator<C, S> {
    pub fn new(clock: C, scheduler: S) -> Self {
        Self {
            state: RunState::Stopped,
            mode: Mode::Countdown,
            time: DEFAULT_TIME,
            initial: DEFAULT_TIME,
            reference: None,
            show_hundredths: true,
            observers: Vec::new(),
            clock,
            scheduler,
        }
    }

    pub fn time(&self) -> TimeVector {
        self.time
    }

    pub fn initial_time(&self) -> TimeVector {
        self.initial
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn shows_hundredths(&self) -> bool {
        self.show_hundredths
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn formatted(&self) -> String {
        format(&self.time, self.show_hundredths)
    }

    /// Register an observer. It is called right away with the current value,
    /// then after every change, in registration order.
    pub fn on_update<F>(&mut self, observer: F)
    where
        F: FnMut(&str) + 'static,
    {
        let text = self.formatted();
        self.observers.push(Box::new(observer));
        if let Some(observer) = self.observers.last_mut() {
            observer(&text);
        }
    }

    fn notify(&mut self) {
        let text = self.formatted();
        for observer in self.observers.iter_mut() {
            observer(&text);
        }
    }

    /// Go back to the last explicitly set vector. Does not stop the clock.
    pub fn reset(&mut self) {
        self.time = self.initial;
        self.notify();
    }

    pub fn set_show_hundredths(&mut self, show: bool) {
        self.show_hundredths = show;
        self.notify();
    }

    /// Replace the vector and remember it for [`reset`](Self::reset).
    ///
    /// Ignored while running; returns whether the vector was taken. Minutes
    /// and seconds are capped at 60. Fields must not be negative.
    pub fn set_time(&mut self, time: TimeVector) -> bool {
        if self.is_running() {
            return false;
        }
        self.time = TimeVector {
            hours: time.hours,
            minutes: time.minutes.min(60),
            seconds: time.seconds.min(60),
            hundredths: time.hundredths,
        };
        self.initial = self.time;
        self.notify();
        true
    }

    pub fn set_to_zero(&mut self) {
        self.time = TimeVector::ZERO;
        self.notify();
    }

    pub fn start(&mut self) {
        if self.reference.is_none() {
            self.reference = Some(self.clock.now());
        }
        if !self.is_running() {
            log::debug!("{} started at {}", self.mode.label(), self.formatted());
            self.state = RunState::Running;
            self.scheduler.schedule_next_tick();
        }
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("{} stopped at {}", self.mode.label(), self.formatted());
        }
        self.state = RunState::Stopped;
        self.reference = None;
    }

    /// Toggle on whether a reference timestamp is held, not on the run state.
    pub fn start_stop(&mut self) {
        if self.reference.is_some() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Switch counting direction. Ignored while running.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.is_running() {
            return false;
        }
        self.mode = mode;
        true
    }

    /// Per-tick entry point.
    pub fn step(&mut self, now: Duration) -> Step {
        if !self.is_running() {
            return Step::Idle;
        }
        let reference = self.reference.unwrap_or(now);
        let elapsed = now.checked_sub(reference).unwrap_or_else(|| {
            log::warn!("clock went backwards: {:?} < {:?}", now, reference);
            Duration::ZERO
        });
        let delta = elapsed.as_nanos() as f64 / NANOS_PER_HUNDREDTH * self.mode.direction();

        match self.time.advanced(delta) {
            Some(next) => {
                log::trace!("step {:?} -> {:?}", elapsed, next);
                self.time = next;
                self.reference = Some(now);
                self.notify();
                self.scheduler.schedule_next_tick();
                Step::Advanced
            }
            None => {
                log::debug!("countdown reached zero");
                self.stop();
                self.time = TimeVector::ZERO;
                // Still held, so the next start_stop is a stop. No new tick.
                self.reference = Some(now);
                self.notify();
                Step::Expired
            }
        }
    }
}
