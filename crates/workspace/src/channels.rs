//! Message transport from views and background tasks to the UI loop.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use actions::Action;
use tokio::sync::mpsc;
use window_view::Channels;

/// A request for the UI loop.
#[derive(Debug)]
pub enum UiMessage {
    UpdateDisplay,
    /// New keys were pushed into the input buffer.
    InputReady,
    Error(anyhow::Error),
    Status(String),
    Action(Action),
    Exit,
}

/// [`Channels`] backed by an unbounded tokio channel.
///
/// Redisplay requests are coalesced: only one `UpdateDisplay` is queued until
/// the loop calls [`UiChannels::display_updated`].
pub struct UiChannels {
    sender: mpsc::UnboundedSender<UiMessage>,
    redisplay_pending: AtomicBool,
    exited: AtomicBool,
}

impl UiChannels {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<UiMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let channels = Arc::new(Self {
            sender,
            redisplay_pending: AtomicBool::new(false),
            exited: AtomicBool::new(false),
        });
        (channels, receiver)
    }

    /// Called by the loop after drawing so the next request queues a redisplay.
    pub fn display_updated(&self) {
        self.redisplay_pending.store(false, Ordering::Release);
    }

    pub fn notify_input(&self) {
        self.send(UiMessage::InputReady);
    }

    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::Acquire)
    }

    fn send(&self, message: UiMessage) {
        if let Err(err) = self.sender.send(message) {
            tracing::debug!("UI loop closed, dropping {:?}", err.0);
        }
    }
}

impl Channels for UiChannels {
    fn update_display(&self) {
        if !self.redisplay_pending.swap(true, Ordering::AcqRel) {
            self.send(UiMessage::UpdateDisplay);
        }
    }

    fn report_error(&self, err: anyhow::Error) {
        self.send(UiMessage::Error(err));
    }

    fn report_status(&self, status: fmt::Arguments<'_>) {
        self.send(UiMessage::Status(status.to_string()));
    }

    fn do_action(&self, action: Action) {
        self.send(UiMessage::Action(action));
    }

    fn exit(&self) -> bool {
        if self.exited.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.send(UiMessage::Exit);
        true
    }
}
