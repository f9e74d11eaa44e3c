use std::time::Duration;

use anyhow::Result;
use chrono::TimeDelta;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    idle::IdleProbe,
    notify::dispatch::Dispatcher,
    utils::{clock::Clock, format::format_duration},
};

use super::{
    config::MonitorConfig,
    messages,
    timer::{SessionState, WorkTimer},
};

/// Polling loop around [WorkTimer]. Samples idle time, advances the session and hands any
/// resulting reminder to the [Dispatcher].
pub struct BreakMonitor {
    probe: Box<dyn IdleProbe>,
    timer: WorkTimer,
    state: SessionState,
    dispatcher: Dispatcher,
    shutdown: CancellationToken,
    check_interval: Duration,
    notify_timeout: Duration,
    clock: Box<dyn Clock>,
}

impl BreakMonitor {
    pub fn new(
        config: &MonitorConfig,
        probe: Box<dyn IdleProbe>,
        dispatcher: Dispatcher,
        shutdown: CancellationToken,
        clock: Box<dyn Clock>,
    ) -> Self {
        let state = SessionState::new(clock.time());
        Self {
            probe,
            timer: WorkTimer::new(config.policy),
            state,
            dispatcher,
            shutdown,
            check_interval: config.check_interval,
            notify_timeout: config.notify_timeout,
            clock,
        }
    }

    /// A failing probe counts as no idle time, so the session keeps accruing.
    fn sample_idle(&mut self) -> TimeDelta {
        match self.probe.idle_time() {
            Ok(idle) => TimeDelta::from_std(idle).unwrap_or(TimeDelta::MAX),
            Err(e) => {
                warn!("Failed to read idle time, assuming the user is active {e:?}");
                TimeDelta::zero()
            }
        }
    }

    fn tick(&mut self) {
        let idle = self.sample_idle();
        let now = self.clock.time();
        let (state, decision) = self.timer.evaluate(self.state, idle, now);
        self.state = state;

        debug!(
            session_start = %state.session_start,
            idle = %format_duration(idle),
            elapsed = %format_duration(state.elapsed(now)),
            overdue = state.overdue,
            overdue_time = %format_duration(state.overdue_time),
            "Tick"
        );

        if let Some(decision) = decision {
            info!("Work timer decided {decision:?}");
            self.dispatcher
                .dispatch(messages::for_decision(&decision, self.notify_timeout));
        }
    }

    /// Runs until the shutdown token is cancelled, then waits for notifications still being
    /// delivered.
    pub async fn run(mut self) -> Result<()> {
        self.dispatcher
            .dispatch(messages::startup(self.timer.policy(), self.notify_timeout));

        let mut tick_point = self.clock.instant();
        loop {
            tick_point += self.check_interval;
            self.tick();

            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = self.clock.sleep_until(tick_point) => ()
            }
        }

        info!("Monitor stopped, waiting for pending notifications");
        self.dispatcher.drain().await;
        Ok(())
    }
}
