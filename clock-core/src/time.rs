//! The four-field time vector and its carry/borrow normalization.

const HUNDREDTHS_PER_SECOND: f64 = 100.0;
const SECONDS_PER_MINUTE: i64 = 60;
const MINUTES_PER_HOUR: i64 = 60;

/// Hours, minutes, seconds and hundredths of a second.
///
/// Minutes, seconds and hundredths may be out of range while a delta is
/// being applied; [`TimeVector::advanced`] always hands back a vector with
/// `0 <= minutes < 60`, `0 <= seconds < 60` and `0 <= hundredths < 100`.
/// Hundredths is fractional so that sub-hundredth frame deltas accumulate
/// instead of being rounded away.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct TimeVector {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub hundredths: f64,
}

impl TimeVector {
    pub const ZERO: TimeVector = TimeVector::new(0, 0, 0, 0.0);

    pub const fn new(hours: i64, minutes: i64, seconds: i64, hundredths: f64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            hundredths,
        }
    }

    /// Whole vector expressed in hundredths of a second.
    #[cfg(test)]
    fn total_hundredths(&self) -> f64 {
        let seconds = (self.hours * MINUTES_PER_HOUR + self.minutes) * SECONDS_PER_MINUTE
            + self.seconds;
        seconds as f64 * HUNDREDTHS_PER_SECOND + self.hundredths
    }

    fn is_negative(&self) -> bool {
        self.hours < 0 || self.minutes < 0 || self.seconds < 0 || self.hundredths < 0.0
    }

    /// Applies `delta` hundredths (already signed by the counting direction)
    /// and cascades carries and borrows bottom-up.
    ///
    /// Returns `None` when the borrow chain runs past hours, i.e. the result
    /// would be below zero.
    pub fn advanced(&self, delta: f64) -> Option<TimeVector> {
        let mut next = *self;
        next.hundredths += delta;

        let carry = (next.hundredths / HUNDREDTHS_PER_SECOND).floor();
        next.hundredths -= carry * HUNDREDTHS_PER_SECOND;
        next.seconds += carry as i64;
        // A tiny negative remainder can round up to exactly 100.0.
        if next.hundredths >= HUNDREDTHS_PER_SECOND {
            next.hundredths -= HUNDREDTHS_PER_SECOND;
            next.seconds += 1;
        }

        next.minutes += next.seconds.div_euclid(SECONDS_PER_MINUTE);
        next.seconds = next.seconds.rem_euclid(SECONDS_PER_MINUTE);

        next.hours += next.minutes.div_euclid(MINUTES_PER_HOUR);
        next.minutes = next.minutes.rem_euclid(MINUTES_PER_HOUR);

        if next.is_negative() {
            None
        } else {
            Some(next)
        }
    }
}

/// Format a vector as "HH:MM:SS", or "HH:MM:SS:CC" with hundredths.
///
/// Fields are padded to two digits, never truncated.
pub fn format(time: &TimeVector, show_hundredths: bool) -> String {
    let mut out = format!(
        "{:02}:{:02}:{:02}",
        time.hours, time.minutes, time.seconds
    );
    if show_hundredths {
        out.push_str(&format!(":{:02}", time.hundredths.floor() as i64));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn in_range(t: &TimeVector) -> bool {
        t.hours >= 0
            && (0..60).contains(&t.minutes)
            && (0..60).contains(&t.seconds)
            && t.hundredths >= 0.0
            && t.hundredths < 100.0
    }

    #[test]
    fn test_carry_into_minutes() {
        let t = TimeVector::new(0, 0, 59, 90.0);
        assert_eq!(t.advanced(20.0), Some(TimeVector::new(0, 1, 0, 10.0)));
    }

    #[test]
    fn test_carry_into_hours() {
        let t = TimeVector::new(0, 59, 59, 99.0);
        assert_eq!(t.advanced(1.0), Some(TimeVector::new(1, 0, 0, 0.0)));
    }

    #[test]
    fn test_large_forward_delta() {
        // 2h 3m 4s 5cs in one frame
        let delta = ((2 * 3600 + 3 * 60 + 4) * 100 + 5) as f64;
        let t = TimeVector::ZERO.advanced(delta).unwrap();
        assert_eq!(t, TimeVector::new(2, 3, 4, 5.0));
    }

    #[test]
    fn test_borrow_cascades_from_hours() {
        let t = TimeVector::new(1, 0, 0, 0.0);
        assert_eq!(t.advanced(-1.0), Some(TimeVector::new(0, 59, 59, 99.0)));
    }

    #[test]
    fn test_borrow_multiple_seconds() {
        let t = TimeVector::new(0, 5, 0, 0.0);
        assert_eq!(t.advanced(-250.0), Some(TimeVector::new(0, 4, 57, 50.0)));
    }

    #[test]
    fn test_underflow_is_none() {
        let t = TimeVector::new(0, 0, 1, 50.0);
        assert_eq!(t.advanced(-200.0), None);
        assert_eq!(TimeVector::ZERO.advanced(-0.5), None);
    }

    #[test]
    fn test_exactly_zero_is_not_underflow() {
        let t = TimeVector::new(0, 0, 1, 50.0);
        assert_eq!(t.advanced(-150.0), Some(TimeVector::ZERO));
    }

    #[test]
    fn test_fraction_accumulates() {
        let mut t = TimeVector::ZERO;
        for _ in 0..60 {
            t = t.advanced(1.6667).unwrap();
        }
        assert_eq!(t.seconds, 1);
        assert_eq!(t.hundredths.floor() as i64, 0);
    }

    #[test]
    fn test_unnormalized_input_is_fixed_up() {
        // set_time allows 60 in minutes and seconds
        let t = TimeVector::new(0, 60, 60, 0.0);
        assert_eq!(t.advanced(0.0), Some(TimeVector::new(1, 1, 0, 0.0)));
    }

    #[test]
    fn test_format() {
        assert_eq!(format(&TimeVector::new(0, 5, 0, 0.0), false), "00:05:00");
        assert_eq!(format(&TimeVector::new(0, 5, 0, 0.0), true), "00:05:00:00");
        assert_eq!(format(&TimeVector::new(1, 0, 0, 0.0), false), "01:00:00");
        assert_eq!(format(&TimeVector::new(123, 0, 0, 0.0), false), "123:00:00");
    }

    #[test]
    fn test_format_floors_hundredths() {
        assert_eq!(format(&TimeVector::new(0, 0, 3, 7.99), true), "00:00:03:07");
        assert_eq!(format(&TimeVector::new(0, 0, 3, 99.999), true), "00:00:03:99");
    }

    fn vector() -> impl Strategy<Value = TimeVector> {
        (0i64..100, 0i64..60, 0i64..60, 0u32..100)
            .prop_map(|(h, m, s, cs)| TimeVector::new(h, m, s, cs as f64))
    }

    proptest! {
        #[test]
        fn carry_preserves_total(start in vector(), delta in 0u32..50_000_000) {
            let delta = delta as f64;
            let next = start.advanced(delta).unwrap();
            prop_assert!(in_range(&next));
            prop_assert_eq!(next.total_hundredths(), start.total_hundredths() + delta);
        }

        #[test]
        fn borrow_preserves_total(start in vector(), fraction in 0.0f64..1.0) {
            let delta = (start.total_hundredths() * fraction).floor();
            let next = start.advanced(-delta).unwrap();
            prop_assert!(in_range(&next));
            prop_assert_eq!(next.total_hundredths(), start.total_hundredths() - delta);
        }

        #[test]
        fn borrow_past_zero_underflows(start in vector(), excess in 1u32..10_000_000) {
            let delta = start.total_hundredths() + excess as f64;
            prop_assert_eq!(start.advanced(-delta), None);
        }
    }
}
