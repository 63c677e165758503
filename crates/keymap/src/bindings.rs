//! View-scoped key binding table.

use actions::{ActionType, ViewHierarchy, ViewId};
use rustc_hash::{FxHashMap, FxHashSet};
use settings::KeybindingEntry;

use crate::keystring;
use crate::KeymapError;

/// What a keystring is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    Action(ActionType),
    /// Substitute the mapped keystring for the matched input and resolve again.
    Keystring(String),
}

impl Binding {
    pub fn none() -> Self {
        Binding::Action(ActionType::None)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Binding::Action(ActionType::None))
    }
}

/// A keystring bound to an action, as listed in help text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundKeyString {
    pub keystring: String,
    pub view_id: ViewId,
    pub user_defined: bool,
}

#[derive(Clone, Debug)]
struct BindingEntry {
    binding: Binding,
    user_defined: bool,
}

#[derive(Clone, Debug, Default)]
struct ViewBindings {
    bindings: FxHashMap<String, BindingEntry>,
    /// Strict token-aligned prefixes of bound keystrings, with the number of
    /// bound keystrings sharing each prefix.
    prefixes: FxHashMap<String, usize>,
}

impl ViewBindings {
    fn insert(&mut self, keystring: &str, entry: BindingEntry) {
        if self.bindings.insert(keystring.to_string(), entry).is_none() {
            for prefix in strict_prefixes(keystring) {
                *self.prefixes.entry(prefix.to_string()).or_insert(0) += 1;
            }
        }
    }

    fn remove(&mut self, keystring: &str) -> bool {
        if self.bindings.remove(keystring).is_none() {
            return false;
        }
        for prefix in strict_prefixes(keystring) {
            if let Some(count) = self.prefixes.get_mut(prefix) {
                *count -= 1;
                if *count == 0 {
                    self.prefixes.remove(prefix);
                }
            }
        }
        true
    }
}

fn strict_prefixes(keystring: &str) -> impl Iterator<Item = &str> {
    keystring::token_ends(keystring)
        .filter(move |end| *end < keystring.len())
        .map(move |end| &keystring[..end])
}

/// Key bindings for every view, resolved along a [`ViewHierarchy`].
#[derive(Clone, Debug, Default)]
pub struct KeyBindings {
    views: FxHashMap<ViewId, ViewBindings>,
}

impl KeyBindings {
    /// An empty binding table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default binding table, with every action name bound to its own action.
    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();
        for action_type in ActionType::ALL {
            if *action_type != ActionType::None {
                bindings.insert(ViewId::All, action_type.name(), Binding::Action(*action_type), false);
            }
        }
        for (view_id, keystring, action_type) in crate::DEFAULT_BINDINGS {
            bindings.insert(*view_id, keystring, Binding::Action(*action_type), false);
        }
        bindings
    }

    fn insert(&mut self, view_id: ViewId, keystring: &str, binding: Binding, user_defined: bool) {
        self.views.entry(view_id).or_default().insert(
            keystring,
            BindingEntry {
                binding,
                user_defined,
            },
        );
    }

    pub fn set_action_binding(
        &mut self,
        view_id: ViewId,
        keystring: &str,
        action_type: ActionType,
    ) -> Result<(), KeymapError> {
        if keystring.is_empty() {
            return Err(KeymapError::EmptyKeystring);
        }
        self.insert(view_id, keystring, Binding::Action(action_type), true);
        Ok(())
    }

    pub fn set_keystring_binding(
        &mut self,
        view_id: ViewId,
        keystring: &str,
        mapped_keystring: &str,
    ) -> Result<(), KeymapError> {
        if keystring.is_empty() {
            return Err(KeymapError::EmptyKeystring);
        }
        self.insert(
            view_id,
            keystring,
            Binding::Keystring(mapped_keystring.to_string()),
            true,
        );
        Ok(())
    }

    /// Remove a binding. Returns whether one was present.
    pub fn remove_binding(&mut self, view_id: ViewId, keystring: &str) -> bool {
        self.views
            .get_mut(&view_id)
            .is_some_and(|view| view.remove(keystring))
    }

    /// Apply keybinding entries read from config.
    ///
    /// Valid entries are applied even when others fail; one error is returned
    /// per rejected entry.
    pub fn apply_entries(&mut self, entries: &[KeybindingEntry]) -> Vec<KeymapError> {
        let mut errors = Vec::new();
        for entry in entries {
            if let Err(err) = self.apply_entry(entry) {
                errors.push(err);
            }
        }
        errors
    }

    fn apply_entry(&mut self, entry: &KeybindingEntry) -> Result<(), KeymapError> {
        let view_id = match entry.view.as_deref() {
            Some(name) => ViewId::from_name(name)?,
            None => ViewId::All,
        };
        match (&entry.action, &entry.keystring) {
            (Some(action), None) => {
                let action_type = ActionType::from_name(action)?;
                self.set_action_binding(view_id, &entry.keys, action_type)
            }
            (None, Some(mapped)) => self.set_keystring_binding(view_id, &entry.keys, mapped),
            _ => Err(KeymapError::AmbiguousBinding {
                keys: entry.keys.clone(),
            }),
        }
    }

    /// Resolve `keystring` along `hierarchy`, most specific view first.
    ///
    /// Returns the first exact match with `false`. Without an exact match
    /// anywhere, returns `Binding::none()` and whether any view holds
    /// `keystring` as a strict prefix of a longer binding.
    pub fn binding(&self, hierarchy: &ViewHierarchy, keystring: &str) -> (Binding, bool) {
        let mut is_prefix = false;
        for view_id in hierarchy.lookup_order() {
            let Some(view) = self.views.get(&view_id) else {
                continue;
            };
            if let Some(entry) = view.bindings.get(keystring) {
                return (entry.binding.clone(), false);
            }
            is_prefix |= view.prefixes.contains_key(keystring);
        }
        (Binding::none(), is_prefix)
    }

    /// Keystrings that trigger `action_type` from the active view, for help text.
    ///
    /// Keystrings shadowed by a more specific binding are skipped, as are the
    /// self-named `<grv-...>` bindings.
    pub fn key_strings(
        &self,
        action_type: ActionType,
        hierarchy: &ViewHierarchy,
    ) -> Vec<BoundKeyString> {
        let mut shadowed: FxHashSet<&str> = FxHashSet::default();
        let mut key_strings = Vec::new();

        for view_id in hierarchy.lookup_order() {
            let Some(view) = self.views.get(&view_id) else {
                continue;
            };
            let mut view_key_strings: Vec<BoundKeyString> = view
                .bindings
                .iter()
                .filter(|(keystring, entry)| {
                    entry.binding == Binding::Action(action_type)
                        && keystring.as_str() != action_type.name()
                        && !shadowed.contains(keystring.as_str())
                })
                .map(|(keystring, entry)| BoundKeyString {
                    keystring: keystring.clone(),
                    view_id,
                    user_defined: entry.user_defined,
                })
                .collect();
            view_key_strings.sort_by(|a, b| a.keystring.cmp(&b.keystring));
            key_strings.extend(view_key_strings);
            shadowed.extend(view.bindings.keys().map(String::as_str));
        }

        key_strings
    }
}
