//! Platform access to "how long since the last keyboard/mouse input".
//! [GenericIdleProbe] picks the backend compiled in through the `win` or `x11` features.

#[cfg(feature = "win")]
pub mod win;
#[cfg(feature = "x11")]
pub mod x11;

#[cfg(feature = "win")]
extern crate windows;

#[cfg(feature = "x11")]
extern crate xcb;

use std::time::Duration;

use anyhow::Result;

/// Contract every platform backend implements.
#[cfg_attr(test, mockall::automock)]
pub trait IdleProbe: Send {
    /// Time elapsed since the user's last input event.
    fn idle_time(&mut self) -> Result<Duration>;
}

/// Serves as a cross-compatible IdleProbe implementation.
pub struct GenericIdleProbe {
    inner: Box<dyn IdleProbe>,
}

impl GenericIdleProbe {
    pub fn new() -> Result<Self> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "win")] {
                use win::WindowsIdleProbe;
                Ok(Self {
                    inner: Box::new(WindowsIdleProbe::new()),
                })
            }
            else if #[cfg(feature = "x11")] {
                use x11::X11IdleProbe;
                Ok(Self {
                    inner: Box::new(X11IdleProbe::new()?),
                })
            }
            else {
                Err(anyhow::anyhow!(
                    "No idle backend was compiled in. Build with `--features x11` or `--features win`"
                ))
            }
        }
    }
}

impl IdleProbe for GenericIdleProbe {
    fn idle_time(&mut self) -> Result<Duration> {
        self.inner.idle_time()
    }
}
