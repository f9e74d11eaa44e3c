use anyhow::Result;
use config::MonitorConfig;
use monitor::BreakMonitor;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::{
    idle::{GenericIdleProbe, IdleProbe},
    notify::dispatch::Dispatcher,
    utils::clock::{Clock, DefaultClock},
};

pub mod args;
pub mod config;
pub mod messages;
pub mod monitor;
pub mod shutdown;
pub mod timer;

/// Represents the starting point for the monitor
pub async fn start_daemon(config: MonitorConfig) -> Result<()> {
    let probe = GenericIdleProbe::new()
        .inspect_err(|e| error!("Failed to initialize idle probe {e:?}"))?;

    let shutdown_token = CancellationToken::new();
    let monitor = create_monitor(&config, probe, &shutdown_token, DefaultClock);

    info!("Starting break monitor with {config:?}");
    let (_, monitor_result) = tokio::join!(
        shutdown::detect_shutdown(shutdown_token.clone()),
        async {
            let result = monitor.run().await;
            // Unblocks the signal listener if the monitor ever stops on its own.
            shutdown_token.cancel();
            result
        },
    );

    if let Err(monitor_result) = &monitor_result {
        error!("Monitor got an error {:?}", monitor_result);
    }
    monitor_result
}

fn create_monitor(
    config: &MonitorConfig,
    probe: impl IdleProbe + 'static,
    shutdown_token: &CancellationToken,
    clock: impl Clock,
) -> BreakMonitor {
    let channels = config
        .channels
        .iter()
        .map(|channel| channel.notifier())
        .collect();
    BreakMonitor::new(
        config,
        Box::new(probe),
        Dispatcher::new(channels),
        shutdown_token.clone(),
        Box::new(clock),
    )
}

#[cfg(test)]
mod daemon_tests {
    use std::{sync::Arc, time::Duration};

    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    use crate::{
        daemon::{config::MonitorConfig, messages::STARTUP_TITLE, monitor::BreakMonitor},
        idle::MockIdleProbe,
        notify::{
            NotificationChannel,
            dispatch::{
                Dispatcher,
                tests::{FailingNotifier, RecordingNotifier},
            },
        },
        utils::{clock::Clock, logging::TEST_LOGGING},
    };

    use super::timer::TimerPolicy;

    const TEST_START_DATE: NaiveDateTime =
        NaiveDateTime::new(NaiveDate::from_ymd_opt(2018, 7, 4).unwrap(), NaiveTime::MIN);

    const CHECK_INTERVAL: Duration = Duration::from_secs(10);

    #[derive(Clone)]
    struct TestClock {
        start_time: DateTime<Utc>,
        reference: Instant,
    }

    #[async_trait]
    impl Clock for TestClock {
        fn time(&self) -> DateTime<Utc> {
            self.start_time + self.reference.elapsed()
        }

        fn instant(&self) -> Instant {
            Instant::now()
        }

        async fn sleep_until(&self, instant: Instant) {
            tokio::time::sleep_until(instant).await;
        }
    }

    fn test_config() -> MonitorConfig {
        MonitorConfig {
            policy: TimerPolicy {
                work_duration: TimeDelta::minutes(45),
                idle_threshold: TimeDelta::minutes(3),
                nudge_interval: TimeDelta::minutes(5),
            },
            check_interval: CHECK_INTERVAL,
            notify_timeout: Duration::from_secs(10),
            channels: vec![NotificationChannel::Terminal],
        }
    }

    /// Returns the idle time for each tick, ticks being numbered from zero.
    fn probe_by_tick(
        idle_for_tick: impl Fn(u64) -> Result<Duration> + Send + 'static,
    ) -> MockIdleProbe {
        let mut probe = MockIdleProbe::new();
        let mut tick = 0;
        probe.expect_idle_time().returning(move || {
            let result = idle_for_tick(tick);
            tick += 1;
            result
        });
        probe
    }

    /// Runs the monitor under paused time until `stop_after` and returns the titles every
    /// working channel received.
    async fn run_monitor(probe: MockIdleProbe, stop_after: Duration) -> Result<Vec<Vec<String>>> {
        let first = Arc::new(RecordingNotifier::default());
        let second = Arc::new(RecordingNotifier::default());
        let dispatcher = Dispatcher::new(vec![
            first.clone(),
            Arc::new(FailingNotifier),
            second.clone(),
        ]);

        let shutdown_token = CancellationToken::new();
        let clock = TestClock {
            start_time: Utc.from_utc_datetime(&TEST_START_DATE),
            reference: Instant::now(),
        };
        let monitor = BreakMonitor::new(
            &test_config(),
            Box::new(probe),
            dispatcher,
            shutdown_token.clone(),
            Box::new(clock),
        );

        let (_, result) = tokio::join!(
            async {
                tokio::time::sleep(stop_after).await;
                shutdown_token.cancel()
            },
            monitor.run(),
        );
        result?;

        Ok([first, second]
            .iter()
            .map(|channel| {
                let mut titles = channel.titles();
                titles.sort();
                titles
            })
            .collect())
    }

    fn sorted(titles: &[&str]) -> Vec<String> {
        let mut titles = titles.iter().map(|t| t.to_string()).collect::<Vec<_>>();
        titles.sort();
        titles
    }

    fn minutes(minutes: u64, seconds: u64) -> Duration {
        Duration::from_secs(minutes * 60 + seconds)
    }

    #[tokio::test(start_paused = true)]
    async fn reminds_and_nudges_while_working() -> Result<()> {
        *TEST_LOGGING;
        let probe = probe_by_tick(|_| Ok(Duration::ZERO));

        let received = run_monitor(probe, minutes(50, 5)).await?;

        let expected = sorted(&[STARTUP_TITLE, "Time for a 3m break!", "Break is 5m overdue!"]);
        assert_eq!(received, vec![expected.clone(), expected]);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn idle_spike_restarts_the_session() -> Result<()> {
        *TEST_LOGGING;
        // Tick 120 happens 20 minutes in.
        let probe = probe_by_tick(|tick| {
            Ok(if tick == 120 {
                Duration::from_secs(3 * 60)
            } else {
                Duration::ZERO
            })
        });

        let received = run_monitor(probe, minutes(65, 5)).await?;

        let expected = sorted(&[STARTUP_TITLE, "Time for a 3m break!"]);
        assert_eq!(received, vec![expected.clone(), expected]);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn break_while_overdue_stops_nudges() -> Result<()> {
        *TEST_LOGGING;
        // Tick 303 happens at 50m30s, right after the first nudge.
        let probe = probe_by_tick(|tick| {
            Ok(if tick == 303 {
                Duration::from_secs(3 * 60 + 1)
            } else {
                Duration::ZERO
            })
        });

        let received = run_monitor(probe, minutes(60, 5)).await?;

        let expected = sorted(&[STARTUP_TITLE, "Time for a 3m break!", "Break is 5m overdue!"]);
        assert_eq!(received, vec![expected.clone(), expected]);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn failing_probe_counts_as_working() -> Result<()> {
        *TEST_LOGGING;
        let probe = probe_by_tick(|_| Err(anyhow!("no display")));

        let received = run_monitor(probe, minutes(45, 5)).await?;

        let expected = sorted(&[STARTUP_TITLE, "Time for a 3m break!"]);
        assert_eq!(received, vec![expected.clone(), expected]);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_shutdown_before_first_reminder() -> Result<()> {
        *TEST_LOGGING;
        let probe = probe_by_tick(|_| Ok(Duration::ZERO));

        let received = run_monitor(probe, minutes(44, 55)).await?;

        let expected = sorted(&[STARTUP_TITLE]);
        assert_eq!(received, vec![expected.clone(), expected]);
        Ok(())
    }
}
