use std::fmt;

use actions::{Action, ActionType, ViewHierarchy};
use keymap::BoundKeyString;
use settings::ConfigVariable;

/// Outbound signals from views to the UI loop.
///
/// All redisplay requests and cross-component signaling flow through here.
pub trait Channels: Send + Sync {
    fn update_display(&self);

    fn report_error(&self, err: anyhow::Error);

    fn report_errors(&self, errs: Vec<anyhow::Error>) {
        for err in errs {
            self.report_error(err);
        }
    }

    fn report_status(&self, status: fmt::Arguments<'_>);

    /// Queue an action for the UI loop.
    fn do_action(&self, action: Action);

    /// Request shutdown. Returns `true` only for the first request.
    fn exit(&self) -> bool;
}

/// Read access to configuration and key bindings.
pub trait Config: Send + Sync {
    fn get_int(&self, variable: ConfigVariable) -> i64;

    fn get_bool(&self, variable: ConfigVariable) -> bool;

    fn get_string(&self, variable: ConfigVariable) -> String;

    /// Keystrings bound to `action_type` as seen from `hierarchy`, for help text.
    fn key_strings(
        &self,
        action_type: ActionType,
        hierarchy: &ViewHierarchy,
    ) -> Vec<BoundKeyString>;
}
