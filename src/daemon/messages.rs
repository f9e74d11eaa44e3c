use std::time::Duration;

use chrono::{DateTime, Local, Utc};

use crate::{
    notify::Notification,
    utils::format::{format_clock_time, format_duration},
};

use super::timer::{Decision, TimerPolicy};

pub const STARTUP_TITLE: &str = "Break Reminder is now running.";

/// One-time summary sent when the monitor starts.
pub fn startup(policy: &TimerPolicy, timeout: Duration) -> Notification {
    Notification {
        title: STARTUP_TITLE.into(),
        message: format!(
            "Time parameters chosen by you:\n\
             Maximum work duration: {}\n\
             Minimum break duration: {}\n\
             When I forget, ping me every: {}",
            format_duration(policy.work_duration),
            format_duration(policy.idle_threshold),
            format_duration(policy.nudge_interval),
        ),
        timeout,
    }
}

pub fn for_decision(decision: &Decision, timeout: Duration) -> Notification {
    match decision {
        Decision::BreakDue {
            session_start,
            elapsed,
            idle_threshold,
        } => Notification {
            title: format!("Time for a {} break!", format_duration(*idle_threshold)),
            message: format!(
                "You started working at {} and you've been active for {}.",
                local_clock_time(session_start),
                format_duration(*elapsed),
            ),
            timeout,
        },
        Decision::OverdueNudge {
            session_start,
            overdue_time,
            nudge_interval,
            idle_threshold,
        } => Notification {
            title: format!("Break is {} overdue!", format_duration(*overdue_time)),
            message: format!(
                "Why are you still working?\n\
                 You've been at it since {}.\n\
                 I'll nudge you every {} until you take a {} break.",
                local_clock_time(session_start),
                format_duration(*nudge_interval),
                format_duration(*idle_threshold),
            ),
            timeout,
        },
    }
}

fn local_clock_time(time: &DateTime<Utc>) -> String {
    format_clock_time(&time.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{Local, TimeDelta, TimeZone, Utc};

    use crate::{
        daemon::timer::{Decision, TimerPolicy},
        utils::format::format_clock_time,
    };

    use super::{for_decision, startup};

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn startup_lists_configuration() {
        let notification = startup(
            &TimerPolicy {
                work_duration: TimeDelta::minutes(45),
                idle_threshold: TimeDelta::minutes(3),
                nudge_interval: TimeDelta::seconds(15),
            },
            TIMEOUT,
        );

        assert_eq!(notification.title, "Break Reminder is now running.");
        assert_eq!(
            notification.message,
            "Time parameters chosen by you:\n\
             Maximum work duration: 45m\n\
             Minimum break duration: 3m\n\
             When I forget, ping me every: 15s"
        );
        assert_eq!(notification.timeout, TIMEOUT);
    }

    #[test]
    fn break_due_message() {
        let session_start = Utc.with_ymd_and_hms(2018, 7, 4, 9, 30, 0).unwrap();
        let notification = for_decision(
            &Decision::BreakDue {
                session_start,
                elapsed: TimeDelta::minutes(45),
                idle_threshold: TimeDelta::minutes(3),
            },
            TIMEOUT,
        );

        let local_start = format_clock_time(&session_start.with_timezone(&Local));
        assert_eq!(notification.title, "Time for a 3m break!");
        assert_eq!(
            notification.message,
            format!("You started working at {local_start} and you've been active for 45m.")
        );
    }

    #[test]
    fn overdue_nudge_message() {
        let session_start = Utc.with_ymd_and_hms(2018, 7, 4, 9, 30, 0).unwrap();
        let notification = for_decision(
            &Decision::OverdueNudge {
                session_start,
                overdue_time: TimeDelta::minutes(90),
                nudge_interval: TimeDelta::minutes(5),
                idle_threshold: TimeDelta::minutes(3),
            },
            TIMEOUT,
        );

        let local_start = format_clock_time(&session_start.with_timezone(&Local));
        assert_eq!(notification.title, "Break is 1.5h overdue!");
        assert_eq!(
            notification.message,
            format!(
                "Why are you still working?\n\
                 You've been at it since {local_start}.\n\
                 I'll nudge you every 5m until you take a 3m break."
            )
        );
    }
}
