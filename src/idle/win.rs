use std::time::Duration;

use anyhow::{Result, anyhow};
use windows::Win32::{
    System::SystemInformation::GetTickCount64,
    UI::Input::KeyboardAndMouse::{GetLastInputInfo, LASTINPUTINFO},
};

use super::IdleProbe;

pub fn get_idle_time() -> Result<Duration> {
    let mut last: LASTINPUTINFO = LASTINPUTINFO {
        cbSize: size_of::<LASTINPUTINFO>() as u32,
        dwTime: 0,
    };
    let is_success = unsafe { GetLastInputInfo(&mut last) };
    if !is_success.as_bool() {
        return Err(anyhow!("Failed to retrieve user idle time"));
    }

    // dwTime is a 32 bit tick count that wraps roughly every 49.7 days, compare in the same width.
    let tick_count = unsafe { GetTickCount64() } as u32;
    let idle_ms = tick_count.wrapping_sub(last.dwTime);
    Ok(Duration::from_millis(idle_ms as u64))
}

#[derive(Default)]
pub struct WindowsIdleProbe {}

impl WindowsIdleProbe {
    pub fn new() -> Self {
        Self {}
    }
}

impl IdleProbe for WindowsIdleProbe {
    fn idle_time(&mut self) -> Result<Duration> {
        get_idle_time()
    }
}
