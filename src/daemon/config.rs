use std::time::Duration;

use chrono::TimeDelta;
use thiserror::Error;
use tracing::warn;

use crate::notify::NotificationChannel;

use super::{args::MonitorArgs, timer::TimerPolicy};

const DEBUG_WORK_MINUTES: f64 = 0.75;
const DEBUG_BREAK_MINUTES: f64 = 0.5;
const DEBUG_NUDGE_MINUTES: f64 = 0.25;
const MAX_SECONDS: u64 = 24 * 60 * 60;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("At least one notification channel must be enabled")]
    NoChannels,
    #[error("{name} must be a positive duration, got {value}")]
    NonPositiveDuration { name: &'static str, value: String },
    #[error("{name} must not exceed one day, got {value} seconds")]
    DurationTooLong { name: &'static str, value: u64 },
}

/// Validated monitor configuration, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub policy: TimerPolicy,
    pub check_interval: Duration,
    pub notify_timeout: Duration,
    pub channels: Vec<NotificationChannel>,
}

impl TryFrom<&MonitorArgs> for MonitorConfig {
    type Error = ConfigError;

    fn try_from(args: &MonitorArgs) -> Result<Self, Self::Error> {
        let (work, idle, nudge) = if args.debug_short_times {
            (DEBUG_WORK_MINUTES, DEBUG_BREAK_MINUTES, DEBUG_NUDGE_MINUTES)
        } else {
            (args.work_minutes, args.break_minutes, args.nudge_minutes)
        };

        let policy = TimerPolicy {
            work_duration: minutes("work duration", work)?,
            idle_threshold: minutes("break duration", idle)?,
            nudge_interval: minutes("nudge interval", nudge)?,
        };
        if policy.nudge_interval > policy.work_duration {
            warn!("Nudge interval is longer than the work duration");
        }

        let check_interval = seconds("check interval", args.check_seconds)?;
        let notify_timeout = match args.notify_timeout {
            Some(timeout) => seconds("notification timeout", timeout)?,
            None => default_notify_timeout(&policy),
        };

        let mut channels = vec![];
        if !args.no_desktop {
            channels.push(NotificationChannel::Desktop);
        }
        if !args.no_terminal {
            channels.push(NotificationChannel::Terminal);
        }
        if channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }

        Ok(Self {
            policy,
            check_interval,
            notify_timeout,
            channels,
        })
    }
}

fn minutes(name: &'static str, value: f64) -> Result<TimeDelta, ConfigError> {
    let millis = value * 60_000.;
    if !millis.is_finite() || millis < 1. || millis > i64::MAX as f64 {
        return Err(ConfigError::NonPositiveDuration {
            name,
            value: format!("{value} minutes"),
        });
    }
    Ok(TimeDelta::milliseconds(millis.round() as i64))
}

fn seconds(name: &'static str, value: u64) -> Result<Duration, ConfigError> {
    if value == 0 {
        return Err(ConfigError::NonPositiveDuration {
            name,
            value: "0 seconds".into(),
        });
    }
    if value > MAX_SECONDS {
        return Err(ConfigError::DurationTooLong { name, value });
    }
    Ok(Duration::from_secs(value))
}

/// A notification is gone a second before the next one can appear.
fn default_notify_timeout(policy: &TimerPolicy) -> Duration {
    let shortest = policy.nudge_interval.min(policy.work_duration);
    let seconds = (shortest.num_seconds() - 1).clamp(1, MAX_SECONDS as i64);
    Duration::from_secs(seconds as u64)
}
