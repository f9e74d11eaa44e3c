use std::io::Write;

use ansi_term::Style;
use anyhow::Result;

use super::{Notification, Notifier, APP_NAME};

/// Prints a framed block to stdout. The title is folded into the body under a fixed
/// [APP_NAME] heading. Printed text can't be dismissed, so the notification timeout is ignored.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn notify(&self, notification: &Notification) -> Result<()> {
        let block = render_block(notification);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{block}")?;
        stdout.flush()?;
        Ok(())
    }
}

fn render_block(notification: &Notification) -> String {
    let body = format!("{}\n\n{}", notification.title, notification.message);
    let width = body
        .lines()
        .chain([APP_NAME])
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let rule = "─".repeat(width + 2);

    let mut block = String::new();
    block.push_str(&format!("┌{rule}┐\n"));
    block.push_str(&format!(
        "│ {} │\n",
        Style::new().bold().paint(pad(APP_NAME, width))
    ));
    block.push_str(&format!("├{rule}┤\n"));
    for line in body.lines() {
        block.push_str(&format!("│ {} │\n", pad(line, width)));
    }
    block.push_str(&format!("└{rule}┘"));
    block
}

fn pad(line: &str, width: usize) -> String {
    let fill = width.saturating_sub(line.chars().count());
    format!("{line}{}", " ".repeat(fill))
}
