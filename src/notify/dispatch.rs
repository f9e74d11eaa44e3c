use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info};

use super::{Notification, Notifier};

/// Fans a notification out to every configured channel. Each delivery runs on its own blocking
/// task holding only a shared reference to the payload, so a slow or failing channel never
/// holds up the poll loop or the other channels.
pub struct Dispatcher {
    channels: Vec<Arc<dyn Notifier>>,
    in_flight: JoinSet<()>,
}

impl Dispatcher {
    pub fn new(channels: Vec<Arc<dyn Notifier>>) -> Self {
        Self {
            channels,
            in_flight: JoinSet::new(),
        }
    }

    /// Fire-and-forget delivery. Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, notification: Notification) {
        self.reap_finished();

        info!("Dispatching notification {:?}", notification.title);
        let notification = Arc::new(notification);
        for channel in &self.channels {
            let channel = channel.clone();
            let notification = notification.clone();
            self.in_flight.spawn_blocking(move || {
                match channel.notify(&notification) {
                    Ok(()) => debug!("Delivered notification through {}", channel.name()),
                    Err(e) => error!(
                        "Failed to deliver notification through {} {e:?}",
                        channel.name()
                    ),
                }
            });
        }
    }

    /// Waits for every delivery that is still running.
    pub async fn drain(&mut self) {
        while let Some(result) = self.in_flight.join_next().await {
            if let Err(e) = result {
                error!("Notification task failed {e:?}");
            }
        }
    }

    fn reap_finished(&mut self) {
        while let Some(result) = self.in_flight.try_join_next() {
            if let Err(e) = result {
                error!("Notification task failed {e:?}");
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use anyhow::{Result, anyhow};

    use crate::{
        notify::{Notification, Notifier},
        utils::logging::TEST_LOGGING,
    };

    use super::Dispatcher;

    /// Keeps every notification it receives.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub received: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        pub fn titles(&self) -> Vec<String> {
            self.received
                .lock()
                .unwrap()
                .iter()
                .map(|n| n.title.clone())
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn notify(&self, notification: &Notification) -> Result<()> {
            self.received.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    pub struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn notify(&self, _: &Notification) -> Result<()> {
            Err(anyhow!("display is unavailable"))
        }
    }

    pub struct PanickingNotifier;

    impl Notifier for PanickingNotifier {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn notify(&self, _: &Notification) -> Result<()> {
            panic!("channel crashed")
        }
    }

    fn notification(title: &str) -> Notification {
        Notification {
            title: title.into(),
            message: "message".into(),
            timeout: Duration::from_secs(10),
        }
    }

    #[tokio::test]
    async fn failing_channels_do_not_block_others() {
        *TEST_LOGGING;
        let first = Arc::new(RecordingNotifier::default());
        let second = Arc::new(RecordingNotifier::default());
        let mut dispatcher = Dispatcher::new(vec![
            Arc::new(FailingNotifier),
            first.clone(),
            Arc::new(PanickingNotifier),
            second.clone(),
        ]);

        dispatcher.dispatch(notification("one"));
        dispatcher.dispatch(notification("two"));
        dispatcher.drain().await;

        let mut first_titles = first.titles();
        first_titles.sort();
        let mut second_titles = second.titles();
        second_titles.sort();
        assert_eq!(first_titles, vec!["one", "two"]);
        assert_eq!(second_titles, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn drain_without_dispatch_returns() {
        let mut dispatcher = Dispatcher::new(vec![Arc::new(RecordingNotifier::default())]);
        dispatcher.drain().await;
    }
}
