mod config;
mod entry;
mod error;
mod frame;
mod input;
mod logging;
mod ui;

use std::io;
use std::rc::Rc;
use std::sync::mpsc::{self, Sender};
use std::thread;

use anyhow::Context;
use clock_core::{Clock, Scheduler, Step, TimeAccumulator};
use crossterm::event::{self, Event, KeyEvent};
use structopt::StructOpt;

use crate::config::Config;
use crate::entry::DigitEntry;
use crate::error::AppError;
use crate::frame::{spawn_pump, SystemClock};
use crate::input::{map_key, Command};
use crate::ui::Readout;

const APP_NAME: &str = "digiclock";

#[derive(Debug)]
pub enum AppOp {
    Redraw,
    Rawkeys(KeyEvent),
    Pump,
    Quit,
}

/// What the main loop should do after handling a message.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Flow {
    Continue,
    Redraw,
    Quit,
}

struct ClockApp<C, S> {
    timer: TimeAccumulator<C, S>,
    entry: DigitEntry,
    readout: Rc<Readout>,
    help_visible: bool,
}

impl<C: Clock, S: Scheduler> ClockApp<C, S> {
    fn new(mut timer: TimeAccumulator<C, S>, config: &Config) -> Self {
        timer.set_mode(config.mode);
        timer.set_time(config.time);
        timer.set_show_hundredths(config.hundredths);

        let readout = Rc::new(Readout::default());
        let sink = readout.clone();
        timer.on_update(move |text| sink.show(text));

        let entry = DigitEntry::from_time(&timer.time());
        Self {
            timer,
            entry,
            readout,
            help_visible: false,
        }
    }

    fn redraw<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        if self.help_visible {
            return ui::draw_help(out, ui::HELP_TEXT);
        }
        ui::draw_clock(
            out,
            &self.readout.current(),
            self.timer.mode(),
            self.timer.is_running(),
        )
    }

    /// Draw a pending time change, unless help covers the clock face.
    fn flush_time<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        if self.help_visible {
            return Ok(());
        }
        match self.readout.take() {
            Some(text) => ui::draw_time(out, &text),
            None => Ok(()),
        }
    }

    fn handle_pump(&mut self) -> Flow {
        let now = self.timer.clock().now();
        match self.timer.step(now) {
            Step::Expired => {
                log::info!("countdown finished");
                Flow::Redraw
            }
            Step::Advanced | Step::Idle => Flow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        let command = match map_key(key) {
            Some(command) => command,
            None => return Flow::Continue,
        };

        // Help is dismissed by any key.
        if self.help_visible {
            self.help_visible = false;
            return match command {
                Command::Quit => Flow::Quit,
                _ => Flow::Redraw,
            };
        }

        self.apply(command)
    }

    fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::StartStop => {
                self.timer.start_stop();
                self.entry.sync(&self.timer.time());
                Flow::Redraw
            }
            Command::Reset => {
                self.timer.reset();
                self.entry.sync(&self.timer.time());
                Flow::Continue
            }
            Command::Restart => {
                self.timer.restart();
                self.entry.sync(&self.timer.time());
                Flow::Redraw
            }
            Command::Digit(digit) => {
                if !self.timer.is_running() {
                    let time = self.entry.push(digit);
                    self.timer.set_time(time);
                }
                Flow::Continue
            }
            Command::Clear => {
                if !self.timer.is_running() {
                    self.timer.set_to_zero();
                    self.entry.sync(&self.timer.time());
                }
                Flow::Continue
            }
            Command::ToggleMode => {
                let next = self.timer.mode().toggled();
                if self.timer.set_mode(next) {
                    log::info!("mode is now {}", next.label());
                    Flow::Redraw
                } else {
                    Flow::Continue
                }
            }
            Command::ToggleHundredths => {
                let show = !self.timer.shows_hundredths();
                self.timer.set_show_hundredths(show);
                Flow::Continue
            }
            Command::Help => {
                self.help_visible = true;
                Flow::Redraw
            }
            Command::Quit => Flow::Quit,
        }
    }
}

fn key_thread(main: Sender<AppOp>) {
    loop {
        let op = match event::read() {
            Ok(Event::Key(key)) => AppOp::Rawkeys(key),
            Ok(Event::Resize(_, _)) => AppOp::Redraw,
            Ok(_) => continue,
            Err(e) => {
                log::error!("can't read terminal events: {}", e);
                AppOp::Quit
            }
        };
        let quit = matches!(op, AppOp::Quit);
        if main.send(op).is_err() || quit {
            break;
        }
    }
}

fn draw_failed(e: io::Error) -> AppError {
    log::error!("can't draw to the terminal: {}", e);
    AppError::Terminal(e)
}

fn run(config: Config) -> Result<(), AppError> {
    let (main_tx, main_rx) = mpsc::channel();
    let (scheduler, pump) = spawn_pump(config.frame_interval(), main_tx.clone());
    let accumulator = TimeAccumulator::new(SystemClock::new(), scheduler);
    let mut app = ClockApp::new(accumulator, &config);

    let _guard = ui::TerminalGuard::enter()?;
    let keys_tx = main_tx.clone();
    thread::spawn(move || key_thread(keys_tx));
    drop(main_tx);

    let mut out = io::stdout();
    app.redraw(&mut out).map_err(draw_failed)?;

    loop {
        let op = main_rx
            .recv()
            .map_err(|_| AppError::Disconnected("input"))?;
        let flow = match op {
            AppOp::Redraw => Flow::Redraw,
            AppOp::Rawkeys(key) => app.handle_key(&key),
            AppOp::Pump => app.handle_pump(),
            AppOp::Quit => Flow::Quit,
        };
        match flow {
            Flow::Quit => break,
            Flow::Redraw => {
                app.readout.take();
                app.redraw(&mut out).map_err(draw_failed)?;
            }
            Flow::Continue => app.flush_time(&mut out).map_err(draw_failed)?,
        }
    }

    // Clean up
    app.timer.stop();
    app.timer.scheduler().shutdown();
    if pump.join().is_err() {
        log::error!("frame pump panicked");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_args();
    logging::init_logging(config.logging()).context("could not set up logging")?;
    log::info!("{} starting: {:?}", APP_NAME, config);

    run(config).with_context(|| format!("{} failed", APP_NAME))
}
