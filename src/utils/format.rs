use std::fmt::Display;

use chrono::{DateTime, TimeDelta, TimeZone};

const SECONDS_IN_MINUTE: f64 = 60.;
const SECONDS_IN_HOUR: f64 = 3600.;

/// Renders a duration the way every user-visible message in breakwatch does: whole seconds below
/// a minute, whole (truncated) minutes below an hour and hours with one decimal place above that.
/// Negative durations are shown as zero.
pub fn format_duration(duration: TimeDelta) -> String {
    let seconds = duration.max(TimeDelta::zero()).num_milliseconds() as f64 / 1000.;
    if seconds < SECONDS_IN_MINUTE {
        format!("{}s", seconds as u64)
    } else if seconds < SECONDS_IN_HOUR {
        format!("{}m", (seconds / SECONDS_IN_MINUTE) as u64)
    } else {
        format!("{:.1}h", seconds / SECONDS_IN_HOUR)
    }
}

/// Renders a moment as 24-hour `HH:MM` in whatever timezone the value carries.
pub fn format_clock_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format("%H:%M").to_string()
}
