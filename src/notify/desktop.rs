use anyhow::Result;
use notify_rust::Timeout;

use super::{Notification, Notifier, APP_NAME};

/// Native notification through notify-rust (D-Bus, Windows toast or macOS notification center).
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn notify(&self, notification: &Notification) -> Result<()> {
        let timeout_ms = u32::try_from(notification.timeout.as_millis()).unwrap_or(u32::MAX);
        notify_rust::Notification::new()
            .summary(&notification.title)
            .body(&notification.message)
            .appname(APP_NAME)
            .timeout(Timeout::Milliseconds(timeout_ms))
            .show()?;
        Ok(())
    }
}
