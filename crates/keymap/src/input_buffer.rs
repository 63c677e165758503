use std::time::Duration;

use actions::{Action, ActionType, ViewHierarchy};
use parking_lot::{Condvar, Mutex};
use settings::constants::input::MAX_KEYSTRING_EXPANSIONS;

use crate::bindings::{Binding, KeyBindings};
use crate::keystring;

/// Pending keystring input shared between the input reader and the UI loop.
#[derive(Debug, Default)]
pub struct InputBuffer {
    buffer: Mutex<String>,
    input_ready: Condvar,
}

enum Resolution {
    Action(Action, String),
    Expand { matched_len: usize, mapped: String },
    Unmatched,
    Pending,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a keystring. Special keys must already be written as tokens.
    pub fn push_key(&self, keystring: &str) {
        if keystring.is_empty() {
            return;
        }
        self.buffer.lock().push_str(keystring);
        self.input_ready.notify_all();
    }

    /// Append typed text, escaping characters that would otherwise open a token.
    pub fn push_str(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        {
            let mut buffer = self.buffer.lock();
            for ch in text.chars() {
                buffer.push_str(&keystring::char_keystring(ch));
            }
        }
        self.input_ready.notify_all();
    }

    pub fn push_char(&self, ch: char) {
        self.push_key(&keystring::char_keystring(ch));
    }

    pub fn has_input(&self) -> bool {
        !self.buffer.lock().is_empty()
    }

    pub fn pending(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    /// Remove everything up to and including the first token-aligned `marker`.
    ///
    /// Returns the removed text and whether `marker` was found. Without a
    /// match the whole buffer is removed.
    pub fn discard_to(&self, marker: &str) -> (String, bool) {
        let mut buffer = self.buffer.lock();
        let marker_end = std::iter::once(0)
            .chain(keystring::token_ends(&buffer))
            .find(|start| *start < buffer.len() && buffer[*start..].starts_with(marker))
            .map(|start| start + marker.len());

        match marker_end {
            Some(end) if !marker.is_empty() => {
                let discarded: String = buffer.drain(..end).collect();
                (discarded, true)
            }
            _ => (std::mem::take(&mut *buffer), false),
        }
    }

    /// Block until input is available or `timeout` elapses.
    pub fn wait_for_input(&self, timeout: Duration) -> bool {
        let mut buffer = self.buffer.lock();
        if buffer.is_empty() {
            self.input_ready.wait_for(&mut buffer, timeout);
        }
        !buffer.is_empty()
    }

    /// Resolve the next action from the buffered input.
    ///
    /// Returns `None` when the buffer is empty or holds only a prefix of a
    /// longer binding. Input matching nothing yields `Action::none()` with its
    /// first token, which is dropped so the next call makes progress.
    pub fn process(
        &self,
        hierarchy: &ViewHierarchy,
        bindings: &KeyBindings,
    ) -> Option<(Action, String)> {
        let mut buffer = self.buffer.lock();
        let mut expansions = 0;

        loop {
            if buffer.is_empty() {
                return None;
            }

            match Self::resolve(&buffer, hierarchy, bindings) {
                Resolution::Action(action, matched) => {
                    buffer.drain(..matched.len());
                    return Some((action, matched));
                }
                Resolution::Expand {
                    matched_len,
                    mapped,
                } => {
                    if expansions >= MAX_KEYSTRING_EXPANSIONS {
                        let token = Self::drop_first_token(&mut buffer);
                        tracing::warn!(
                            "Keystring expansion limit reached, dropping {:?}",
                            token
                        );
                        return Some((Action::none(), token));
                    }
                    expansions += 1;
                    tracing::trace!("Expanding {:?} to {:?}", &buffer[..matched_len], mapped);
                    buffer.replace_range(..matched_len, &mapped);
                }
                Resolution::Unmatched => {
                    let token = Self::drop_first_token(&mut buffer);
                    tracing::trace!("No binding for {:?}", token);
                    return Some((Action::none(), token));
                }
                Resolution::Pending => return None,
            }
        }
    }

    fn resolve(buffer: &str, hierarchy: &ViewHierarchy, bindings: &KeyBindings) -> Resolution {
        for end in keystring::token_ends(buffer) {
            let prefix = &buffer[..end];
            match bindings.binding(hierarchy, prefix) {
                (Binding::Action(action_type), _) if action_type != ActionType::None => {
                    return Resolution::Action(Action::new(action_type), prefix.to_string());
                }
                (Binding::Keystring(mapped), _) => {
                    return Resolution::Expand {
                        matched_len: end,
                        mapped,
                    };
                }
                (_, true) => continue,
                (_, false) => return Resolution::Unmatched,
            }
        }
        Resolution::Pending
    }

    fn drop_first_token(buffer: &mut String) -> String {
        let len = keystring::first_token(buffer).map_or(0, str::len);
        buffer.drain(..len).collect()
    }
}
