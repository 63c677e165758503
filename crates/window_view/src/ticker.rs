//! Periodic redisplay while a pane loads data in the background.

use std::sync::Arc;
use std::time::Duration;

use settings::constants::timing::LOADING_TICK_INTERVAL;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::Channels;

/// Requests a redisplay every `interval` until stopped.
///
/// Stopping always produces one final redisplay so a loading indicator is
/// never left on screen.
pub struct Ticker {
    cancel: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn the ticker on the current tokio runtime.
    pub fn start(channels: Arc<dyn Channels>, interval: Duration) -> Self {
        let (cancel, mut cancelled) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticks.tick().await;
            loop {
                tokio::select! {
                    _ = ticks.tick() => channels.update_display(),
                    _ = &mut cancelled => {
                        channels.update_display();
                        break;
                    }
                }
            }
            tracing::trace!("Ticker stopped");
        });

        Self {
            cancel: Some(cancel),
            handle,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the ticker and wait for its final redisplay.
    pub async fn stop(mut self) {
        // Dropping the sender closes the cancellation channel.
        drop(self.cancel.take());
        if let Err(err) = self.handle.await {
            tracing::warn!("Ticker task failed: {}", err);
        }
    }
}

/// Holds at most one ticker for a logical context.
#[derive(Default)]
pub struct TickerSlot {
    ticker: tokio::sync::Mutex<Option<Ticker>>,
}

impl TickerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop and drain the previous ticker, then start a new one.
    pub async fn restart(&self, channels: Arc<dyn Channels>, interval: Duration) {
        let mut slot = self.ticker.lock().await;
        if let Some(previous) = slot.take() {
            previous.stop().await;
        }
        *slot = Some(Ticker::start(channels, interval));
    }

    /// Restart with the loading indicator interval.
    pub async fn restart_loading(&self, channels: Arc<dyn Channels>) {
        self.restart(channels, LOADING_TICK_INTERVAL).await;
    }

    pub async fn stop(&self) {
        let previous = self.ticker.lock().await.take();
        if let Some(previous) = previous {
            previous.stop().await;
        }
    }

    pub async fn is_running(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingChannels;

    const NEVER: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn stop_sends_final_redisplay() {
        let channels = Arc::new(RecordingChannels::new());
        let ticker = Ticker::start(channels.clone(), NEVER);

        ticker.stop().await;
        assert_eq!(channels.display_updates(), 1);
    }

    #[tokio::test]
    async fn ticks_until_stopped() {
        let channels = Arc::new(RecordingChannels::new());
        let ticker = Ticker::start(channels.clone(), Duration::from_millis(5));

        tokio::time::sleep(Duration::from_millis(60)).await;
        ticker.stop().await;
        let updates = channels.display_updates();
        assert!(updates >= 2, "expected ticks before stop, got {updates}");

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(channels.display_updates(), updates);
    }

    #[tokio::test]
    async fn restart_drains_previous_ticker() {
        let channels = Arc::new(RecordingChannels::new());
        let slot = TickerSlot::new();

        slot.restart(channels.clone(), NEVER).await;
        assert!(slot.is_running().await);
        slot.restart(channels.clone(), NEVER).await;
        assert_eq!(channels.display_updates(), 1);

        slot.stop().await;
        assert_eq!(channels.display_updates(), 2);
        assert!(!slot.is_running().await);
    }

    #[tokio::test]
    async fn loading_ticker_uses_loading_interval() {
        let channels = Arc::new(RecordingChannels::new());
        let slot = TickerSlot::new();

        slot.restart_loading(channels.clone()).await;
        tokio::time::sleep(LOADING_TICK_INTERVAL / 2).await;
        assert_eq!(channels.display_updates(), 0);

        tokio::time::sleep(LOADING_TICK_INTERVAL * 2).await;
        slot.stop().await;
        let updates = channels.display_updates();
        assert!(updates >= 2, "expected a tick and the final redisplay, got {updates}");
    }
}
