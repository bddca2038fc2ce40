use clock_core::TimeVector;

/// Shift-in digit editing over the visible `HHMMSS` digits.
///
/// Keeps its own copy of hours, minutes and seconds so that a value the
/// accumulator clamped (seconds typed as 99 become 60) still shifts on
/// with the digits that were typed.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DigitEntry {
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl DigitEntry {
    pub fn from_time(time: &TimeVector) -> Self {
        Self {
            hours: time.hours,
            minutes: time.minutes,
            seconds: time.seconds,
        }
    }

    pub fn sync(&mut self, time: &TimeVector) {
        *self = Self::from_time(time);
    }

    /// Drop the leading digit, append `digit`, and return the new vector
    /// (hundredths zeroed) for `set_time`.
    pub fn push(&mut self, digit: u8) -> TimeVector {
        let hours = digit_at(self.hours, 1) * 10 + digit_at(self.minutes, 0);
        let minutes = digit_at(self.minutes, 1) * 10 + digit_at(self.seconds, 0);
        let seconds = digit_at(self.seconds, 1) * 10 + i64::from(digit % 10);
        self.hours = hours;
        self.minutes = minutes;
        self.seconds = seconds;
        TimeVector::new(hours, minutes, seconds, 0.0)
    }
}

/// Digit `index` of the value as shown, padded to at least two places.
fn digit_at(value: i64, index: usize) -> i64 {
    let shown = format!("{:02}", value.max(0));
    shown
        .as_bytes()
        .get(index)
        .map(|b| i64::from(b - b'0'))
        .unwrap_or(0)
}
