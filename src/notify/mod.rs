//! Delivery of reminders to the user. Each [NotificationChannel] maps onto a [Notifier]
//! implementation and the [Dispatcher](dispatch::Dispatcher) fans a [Notification] out to all of
//! them.

pub mod desktop;
pub mod dispatch;
pub mod terminal;

use std::{fmt::Display, sync::Arc, time::Duration};

use anyhow::Result;
use clap::ValueEnum;

/// Name every notification is shown under.
pub const APP_NAME: &str = "Break Reminder";

/// Immutable payload handed to every channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    /// How long the channel should keep the notification on screen.
    pub timeout: Duration,
}

/// A way of showing a notification. Implementations are called from blocking tasks, so they are
/// free to block until the platform acknowledges the notification.
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn notify(&self, notification: &Notification) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum NotificationChannel {
    /// Native desktop notification
    Desktop,
    /// Framed message printed to stdout
    Terminal,
}

impl NotificationChannel {
    pub fn notifier(self) -> Arc<dyn Notifier> {
        match self {
            NotificationChannel::Desktop => Arc::new(desktop::DesktopNotifier),
            NotificationChannel::Terminal => Arc::new(terminal::TerminalNotifier),
        }
    }
}

impl Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationChannel::Desktop => write!(f, "desktop"),
            NotificationChannel::Terminal => write!(f, "terminal"),
        }
    }
}
