use std::time::Duration;

use anyhow::{Result, anyhow};
use tracing::instrument;
use xcb::{
    Connection,
    screensaver::{QueryInfo, QueryInfoReply},
    x::{Drawable, Window},
};

/// Reads idle time from the MIT-SCREEN-SAVER extension of the X server.
pub struct X11IdleProbe {
    connection: Connection,
    preferred_screen: i32,
}

impl X11IdleProbe {
    pub fn new() -> Result<Self> {
        let (connection, preferred_screen) =
            Connection::connect_with_extensions(None, &[xcb::Extension::ScreenSaver], &[])?;
        Ok(Self {
            connection,
            preferred_screen,
        })
    }

    fn root_window(&self) -> Result<Window> {
        // Currently the application only supports 1 x11 screen.
        let setup = self.connection.get_setup();
        setup
            .roots()
            .nth(self.preferred_screen.max(0) as usize)
            .map(|screen| screen.root())
            .ok_or_else(|| anyhow!("X server has no screen {}", self.preferred_screen))
    }
}

impl super::IdleProbe for X11IdleProbe {
    #[instrument(skip(self))]
    fn idle_time(&mut self) -> Result<Duration> {
        let root = self.root_window()?;
        let cookie = self.connection.send_request(&QueryInfo {
            drawable: Drawable::Window(root),
        });
        let reply: QueryInfoReply = self.connection.wait_for_reply(cookie)?;
        Ok(Duration::from_millis(reply.ms_since_user_input() as u64))
    }
}
