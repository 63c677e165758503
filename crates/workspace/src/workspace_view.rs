use std::sync::Arc;

use actions::{Action, ActionArg, ActionType, MouseEvent, PromptInput};
use keymap::{keystring, InputBuffer, KeymapError};
use parking_lot::Mutex;
use settings::constants::input::PROMPT_TERMINATOR;
use settings::ConfigVariable;
use tokio::sync::mpsc;
use window_view::{Channels, Config, SharedWindow, ViewDimension, ViewState, WindowView};

use crate::{AppConfig, ContainerView, UiChannels, UiMessage};

/// What the UI loop should do after a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageOutcome {
    Continue,
    Redraw,
    Exit,
}

/// Top-level state: the pane tree, pending input and the message transport.
pub struct Workspace {
    root: Arc<ContainerView>,
    input: Arc<InputBuffer>,
    config: Arc<AppConfig>,
    channels: Arc<UiChannels>,
    dimension: Mutex<ViewDimension>,
    status: Mutex<Option<String>>,
    errors: Mutex<Vec<String>>,
}

impl Workspace {
    pub fn new(
        root: Arc<ContainerView>,
        input: Arc<InputBuffer>,
        config: Arc<AppConfig>,
        channels: Arc<UiChannels>,
    ) -> Self {
        root.on_state_change(ViewState::Active);
        Self {
            root,
            input,
            config,
            channels,
            dimension: Mutex::new(ViewDimension::default()),
            status: Mutex::new(None),
            errors: Mutex::new(Vec::new()),
        }
    }

    pub fn root(&self) -> &Arc<ContainerView> {
        &self.root
    }

    pub fn input(&self) -> &Arc<InputBuffer> {
        &self.input
    }

    pub fn config(&self) -> &Arc<AppConfig> {
        &self.config
    }

    /// Surface keybinding errors collected while loading config.
    pub fn report_config_errors(&self, errors: Vec<KeymapError>) {
        self.channels
            .report_errors(errors.into_iter().map(anyhow::Error::from).collect());
    }

    pub fn resize(&self, dimension: ViewDimension) {
        *self.dimension.lock() = dimension;
        self.channels.update_display();
    }

    /// Last status message received.
    pub fn status(&self) -> Option<String> {
        self.status.lock().clone()
    }

    /// Errors received since the last call.
    pub fn take_errors(&self) -> Vec<String> {
        std::mem::take(&mut *self.errors.lock())
    }

    /// Resolve and dispatch every complete action in the input buffer.
    ///
    /// The hierarchy is recomputed per action since an action can move focus.
    pub fn process_input(&self) {
        loop {
            let hierarchy = self.root.active_view_hierarchy();
            let resolved = self.input.process(&hierarchy, &self.config.bindings());
            let Some((action, keystring)) = resolved else {
                break;
            };

            if action.is_none() {
                tracing::trace!("No action bound to {:?}", keystring);
                continue;
            }

            let action = self.take_prompt_input(action);
            let exit = action.action_type == ActionType::Exit;
            self.dispatch(action);
            if exit {
                break;
            }
        }
    }

    /// A prompt action takes the buffered input up to `<Enter>` as its answer,
    /// or what was typed so far as the pre-filled prompt.
    fn take_prompt_input(&self, action: Action) -> Action {
        if !action.action_type.is_prompt() || !self.input.has_input() {
            return action;
        }

        let (mut taken, submitted) = self.input.discard_to(PROMPT_TERMINATOR);
        if submitted {
            taken.truncate(taken.len() - PROMPT_TERMINATOR.len());
        } else if !self.config.get_bool(ConfigVariable::InputPromptAfterKeys) {
            tracing::trace!("Discarding keys typed after {}: {:?}", action.action_type, taken);
            return action;
        }

        let text = keystring::unescape(&taken);
        Action::with_arg(
            action.action_type,
            ActionArg::Prompt(PromptInput { text, submitted }),
        )
    }

    /// Apply `action` to the pane tree, reporting any error.
    pub fn dispatch(&self, action: Action) {
        if action.action_type == ActionType::Exit {
            if self.channels.exit() {
                tracing::debug!("Exit requested");
            }
            return;
        }

        match self.root.handle_action(&action) {
            Ok(true) => {}
            Ok(false) => tracing::trace!("Unhandled action {}", action.action_type),
            Err(err) => {
                tracing::debug!("{} failed: {:#}", action.action_type, err);
                self.channels.report_error(err);
            }
        }
    }

    /// Dispatch a mouse event when mouse support is enabled.
    pub fn handle_mouse_event(&self, event: MouseEvent) {
        if !self.config.get_bool(ConfigVariable::Mouse) {
            tracing::trace!("Mouse disabled, ignoring {:?}", event);
            return;
        }
        self.dispatch(event.action());
    }

    pub fn handle_message(&self, message: UiMessage) -> MessageOutcome {
        match message {
            UiMessage::UpdateDisplay => MessageOutcome::Redraw,
            UiMessage::InputReady => {
                self.process_input();
                MessageOutcome::Continue
            }
            UiMessage::Error(err) => {
                self.errors.lock().push(format!("{err:#}"));
                MessageOutcome::Redraw
            }
            UiMessage::Status(status) => {
                *self.status.lock() = Some(status);
                MessageOutcome::Redraw
            }
            UiMessage::Action(action) => {
                self.dispatch(action);
                MessageOutcome::Continue
            }
            UiMessage::Exit => MessageOutcome::Exit,
        }
    }

    /// Render the pane tree at the current terminal size.
    pub fn render(&self) -> anyhow::Result<Vec<SharedWindow>> {
        self.channels.display_updated();
        let dimension = *self.dimension.lock();
        self.root.render_at(dimension, 0, 0)
    }

    /// Process messages until exit, passing every rendered frame to `draw`.
    pub async fn run(
        &self,
        mut receiver: mpsc::UnboundedReceiver<UiMessage>,
        mut draw: impl FnMut(&[SharedWindow]),
    ) -> anyhow::Result<()> {
        self.channels.update_display();
        while let Some(message) = receiver.recv().await {
            match self.handle_message(message) {
                MessageOutcome::Continue => {}
                MessageOutcome::Redraw => draw(&self.render()?),
                MessageOutcome::Exit => break,
            }
        }
        tracing::debug!("UI loop finished");
        Ok(())
    }
}
