use std::cell::{Cell, RefCell};
use std::io::{self, Write};

use clock_core::Mode;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

const LEFT: u16 = 2;
const TITLE_ROW: u16 = 1;
const TIME_ROW: u16 = 3;
const STATE_ROW: u16 = 5;
const FOOTER_ROW: u16 = 7;

pub const HELP_TEXT: &str = "DIGICLOCK HELP\n\n\
     Space   Start/Stop\n\
     Enter   Restart from set time\n\
     r       Reset to set time\n\
     0-9     Type a new time (stopped)\n\
     Del     Clear to zero (stopped)\n\
     m       Countdown/Stopwatch (stopped)\n\
     h       Show/hide hundredths\n\
     F1 ?    Help\n\
     q Esc   Quit";

/// Display sink for the formatted time. The accumulator's observer writes
/// here; the main loop draws whatever is pending.
#[derive(Debug, Default)]
pub struct Readout {
    text: RefCell<String>,
    dirty: Cell<bool>,
}

impl Readout {
    pub fn show(&self, text: &str) {
        let mut current = self.text.borrow_mut();
        current.clear();
        current.push_str(text);
        self.dirty.set(true);
    }

    pub fn current(&self) -> String {
        self.text.borrow().clone()
    }

    /// The latest text if it changed since the last call.
    pub fn take(&self) -> Option<String> {
        if self.dirty.replace(false) {
            Some(self.current())
        } else {
            None
        }
    }
}

/// Raw mode and alternate screen for as long as this lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        execute!(io::stdout(), Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

pub fn status_line(mode: Mode, running: bool) -> String {
    let state = if running { "Running" } else { "Stopped" };
    format!("{}  {}", mode.label(), state)
}

pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))
}

pub fn draw_time<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    queue!(
        out,
        MoveTo(LEFT, TIME_ROW),
        Clear(ClearType::CurrentLine),
        SetAttribute(Attribute::Bold),
        Print(text),
        SetAttribute(Attribute::Reset),
    )?;
    out.flush()
}

pub fn draw_clock<W: Write>(out: &mut W, time: &str, mode: Mode, running: bool) -> io::Result<()> {
    clear_screen(out)?;
    queue!(
        out,
        MoveTo(LEFT, TITLE_ROW),
        SetAttribute(Attribute::Bold),
        Print("DIGICLOCK"),
        SetAttribute(Attribute::Reset),
        MoveTo(LEFT, STATE_ROW),
        Print(status_line(mode, running)),
        MoveTo(LEFT, FOOTER_ROW),
        Print("SPACE=start/stop  ENTER=restart  r=reset  0-9=set  DEL=clear"),
        MoveTo(LEFT, FOOTER_ROW + 1),
        Print("m=mode  h=hundredths  F1=help  q=quit"),
    )?;
    draw_time(out, time)
}

pub fn draw_help<W: Write>(out: &mut W, help_text: &str) -> io::Result<()> {
    clear_screen(out)?;
    let mut row = TITLE_ROW;
    for line in help_text.lines() {
        queue!(out, MoveTo(LEFT, row), Print(line))?;
        row += 1;
    }
    queue!(out, MoveTo(LEFT, row + 1), Print("Press any key to close"))?;
    out.flush()
}
