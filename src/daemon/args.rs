use std::path::PathBuf;

use clap::{Args, Parser};
use tracing::level_filters::LevelFilter;

/// Timing and delivery options of the monitor.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct MonitorArgs {
    #[arg(long = "work-minutes", default_value_t = 45., help = "How long to work before a break")]
    pub work_minutes: f64,
    #[arg(
        long = "break-minutes",
        default_value_t = 3.,
        help = "How long to be idle before it counts as a break"
    )]
    pub break_minutes: f64,
    #[arg(
        long = "nudge-minutes",
        default_value_t = 5.,
        help = "How often to nudge while the break is overdue"
    )]
    pub nudge_minutes: f64,
    #[arg(
        long = "check-seconds",
        default_value_t = 10,
        help = "How often to sample idle time"
    )]
    pub check_seconds: u64,
    #[arg(
        long = "notify-timeout",
        help = "Seconds a notification stays on screen. Defaults to one second less than the shorter of the nudge interval and the work duration"
    )]
    pub notify_timeout: Option<u64>,
    #[arg(long = "no-desktop", help = "Disable native desktop notifications")]
    pub no_desktop: bool,
    #[arg(long = "no-terminal", help = "Disable notifications printed to stdout")]
    pub no_terminal: bool,
    /// This option is for debugging purposes only.
    #[arg(long = "debug-short-times")]
    pub debug_short_times: bool,
}

impl Default for MonitorArgs {
    fn default() -> Self {
        Self {
            work_minutes: 45.,
            break_minutes: 3.,
            nudge_minutes: 5.,
            check_seconds: 10,
            notify_timeout: None,
            no_desktop: false,
            no_terminal: false,
            debug_short_times: false,
        }
    }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct DaemonArgs {
    #[command(flatten)]
    pub monitor: MonitorArgs,
    #[arg(
        long,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    pub dir: Option<PathBuf>,
    /// This option is for debugging purposes only.
    #[arg(long = "log-console")]
    pub log_console: bool,
    #[arg(long = "log-filter")]
    pub log: Option<LevelFilter>,
}

impl DaemonArgs {
    /// Arguments for a monitor running without a console. Its stdout goes nowhere, so the
    /// terminal channel is turned off and can't satisfy the channel requirement.
    pub fn detached(&self) -> Self {
        let mut args = self.clone();
        args.monitor.no_terminal = true;
        args.log_console = false;
        args
    }

    /// Flags reproducing these arguments, used when respawning the monitor as a detached process.
    pub fn to_command_args(&self) -> Vec<String> {
        let monitor = &self.monitor;
        let mut args = vec![
            "--work-minutes".to_string(),
            monitor.work_minutes.to_string(),
            "--break-minutes".to_string(),
            monitor.break_minutes.to_string(),
            "--nudge-minutes".to_string(),
            monitor.nudge_minutes.to_string(),
            "--check-seconds".to_string(),
            monitor.check_seconds.to_string(),
        ];
        if let Some(timeout) = monitor.notify_timeout {
            args.push("--notify-timeout".into());
            args.push(timeout.to_string());
        }
        if monitor.no_desktop {
            args.push("--no-desktop".into());
        }
        if monitor.no_terminal {
            args.push("--no-terminal".into());
        }
        if monitor.debug_short_times {
            args.push("--debug-short-times".into());
        }
        if let Some(dir) = &self.dir {
            args.push("--dir".into());
            args.push(dir.to_string_lossy().into_owned());
        }
        if self.log_console {
            args.push("--log-console".into());
        }
        if let Some(log) = self.log {
            args.push("--log-filter".into());
            args.push(log.to_string());
        }
        args
    }
}
