use std::path::PathBuf;
use std::time::Duration;

use clock_core::{Mode, TimeVector};
use structopt::StructOpt;

use crate::logging::LoggingConfig;

const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Debug, StructOpt)]
#[structopt(name = "digiclock", about = "Keyboard-driven countdown timer and stopwatch")]
pub struct Config {
    /// Counting mode: "countdown" or "stopwatch"
    #[structopt(long, default_value = "countdown", parse(try_from_str = parse_mode))]
    pub mode: Mode,

    /// Starting time as HH:MM:SS, MM:SS or plain seconds
    #[structopt(long, default_value = "00:05:00", parse(try_from_str = parse_hms))]
    pub time: TimeVector,

    /// Show the hundredths field
    #[structopt(long)]
    pub hundredths: bool,

    /// Milliseconds between frames while running
    #[structopt(long, default_value = "16")]
    pub frame_ms: u64,

    /// Write logs to this file instead of stderr
    #[structopt(long, parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    /// Log filter in env_logger syntax, e.g. "debug" or "clock_core=trace"
    #[structopt(long)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        match self.frame_ms {
            0 => Duration::from_millis(DEFAULT_FRAME_MS),
            ms => Duration::from_millis(ms),
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_level.clone(),
            file: self.log_file.clone(),
        }
    }
}

pub fn parse_mode(s: &str) -> Result<Mode, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "countdown" | "timer" => Ok(Mode::Countdown),
        "stopwatch" => Ok(Mode::Stopwatch),
        other => Err(format!("unknown mode '{}'", other)),
    }
}

/// Parse "HH:MM:SS", "MM:SS" or "SS". Overlong fields roll over, so
/// "90" is a minute and a half.
pub fn parse_hms(s: &str) -> Result<TimeVector, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() > 3 {
        return Err(format!("too many fields in '{}'", s));
    }
    let mut total_secs: i64 = 0;
    for part in parts {
        let value = part
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("'{}' is not a number", part.trim()))?;
        total_secs = total_secs * 60 + i64::from(value);
    }
    Ok(TimeVector::new(
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60,
        0.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_hms() {
        assert_eq!(parse_hms("05:00"), Ok(TimeVector::new(0, 5, 0, 0.0)));
        assert_eq!(parse_hms("1:02:03"), Ok(TimeVector::new(1, 2, 3, 0.0)));
        assert_eq!(parse_hms("90"), Ok(TimeVector::new(0, 1, 30, 0.0)));
        assert_eq!(parse_hms(" 00:75:00 "), Ok(TimeVector::new(1, 15, 0, 0.0)));
        assert_eq!(parse_hms("125:00:00"), Ok(TimeVector::new(125, 0, 0, 0.0)));
    }

    #[test]
    fn test_parse_hms_rejects_garbage() {
        assert!(parse_hms("").is_err());
        assert!(parse_hms("ab:cd").is_err());
        assert!(parse_hms("-1:00").is_err());
        assert!(parse_hms("1:2:3:4").is_err());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("Stopwatch"), Ok(Mode::Stopwatch));
        assert_eq!(parse_mode("timer"), Ok(Mode::Countdown));
        assert!(parse_mode("alarm").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_iter(&["digiclock"]);
        assert_eq!(config.mode, Mode::Countdown);
        assert_eq!(config.time, TimeVector::new(0, 5, 0, 0.0));
        assert!(!config.hundredths);
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_zero_frame_interval_falls_back() {
        let config = Config::from_iter(&["digiclock", "--frame-ms", "0", "--mode", "stopwatch"]);
        assert_eq!(config.frame_interval(), Duration::from_millis(DEFAULT_FRAME_MS));
        assert_eq!(config.mode, Mode::Stopwatch);
    }

    proptest! {
        #[test]
        fn parse_hms_reads_back_formatted_time(h in 0i64..1000, m in 0i64..60, s in 0i64..60) {
            let text = clock_core::format(&TimeVector::new(h, m, s, 0.0), false);
            prop_assert_eq!(parse_hms(&text), Ok(TimeVector::new(h, m, s, 0.0)));
        }

        #[test]
        fn parse_hms_keeps_total_seconds(m in 0u32..1000, s in 0u32..1000) {
            let t = parse_hms(&format!("{}:{}", m, s)).unwrap();
            prop_assert!((0..60).contains(&t.minutes) && (0..60).contains(&t.seconds));
            let total = (t.hours * 60 + t.minutes) * 60 + t.seconds;
            prop_assert_eq!(total, i64::from(m) * 60 + i64::from(s));
        }
    }
}
