use smallvec::SmallVec;

use crate::ActionError;

/// Identifies a kind of view. Key bindings and help text are scoped by view id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    /// Matches every view.
    All,
    Main,
    Container,
    History,
    Ref,
    Commit,
    Diff,
    Status,
    GitStatus,
    Summary,
    Help,
    Error,
    Message,
}

impl ViewId {
    pub const ALL: &'static [ViewId] = &[
        ViewId::All,
        ViewId::Main,
        ViewId::Container,
        ViewId::History,
        ViewId::Ref,
        ViewId::Commit,
        ViewId::Diff,
        ViewId::Status,
        ViewId::GitStatus,
        ViewId::Summary,
        ViewId::Help,
        ViewId::Error,
        ViewId::Message,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ViewId::All => "All",
            ViewId::Main => "Main",
            ViewId::Container => "Container",
            ViewId::History => "History",
            ViewId::Ref => "Ref",
            ViewId::Commit => "Commit",
            ViewId::Diff => "Diff",
            ViewId::Status => "Status",
            ViewId::GitStatus => "GitStatus",
            ViewId::Summary => "Summary",
            ViewId::Help => "Help",
            ViewId::Error => "Error",
            ViewId::Message => "Message",
        }
    }

    /// Case-insensitive lookup used when reading key bindings from config.
    pub fn from_name(name: &str) -> Result<Self, ActionError> {
        Self::ALL
            .iter()
            .copied()
            .find(|view_id| view_id.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ActionError::UnknownView(name.to_string()))
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered view ids from the most general scope down to the active leaf view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewHierarchy(SmallVec<[ViewId; 6]>);

impl ViewHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, view_id: ViewId) {
        self.0.push(view_id);
    }

    pub fn extend(&mut self, other: &ViewHierarchy) {
        self.0.extend(other.0.iter().copied());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, view_id: ViewId) -> bool {
        self.0.contains(&view_id)
    }

    pub fn most_specific(&self) -> Option<ViewId> {
        self.0.last().copied()
    }

    /// General to specific.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = ViewId> + '_ {
        self.0.iter().copied()
    }

    /// Lookup order for bindings: most specific view first, always ending with `ViewId::All`.
    pub fn lookup_order(&self) -> impl Iterator<Item = ViewId> + '_ {
        let needs_all = !self.contains(ViewId::All);
        self.0
            .iter()
            .rev()
            .copied()
            .chain(needs_all.then_some(ViewId::All))
    }
}

impl FromIterator<ViewId> for ViewHierarchy {
    fn from_iter<T: IntoIterator<Item = ViewId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[ViewId; N]> for ViewHierarchy {
    fn from(views: [ViewId; N]) -> Self {
        views.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_order_is_specific_first_and_ends_with_all() {
        let hierarchy = ViewHierarchy::from([ViewId::All, ViewId::History, ViewId::Commit]);
        let order: Vec<ViewId> = hierarchy.lookup_order().collect();
        assert_eq!(order, vec![ViewId::Commit, ViewId::History, ViewId::All]);
    }

    #[test]
    fn lookup_order_appends_all_when_missing() {
        let hierarchy = ViewHierarchy::from([ViewId::Diff]);
        let order: Vec<ViewId> = hierarchy.lookup_order().collect();
        assert_eq!(order, vec![ViewId::Diff, ViewId::All]);
    }

    #[test]
    fn view_names_parse_case_insensitively() {
        assert_eq!(ViewId::from_name("gitstatus"), Ok(ViewId::GitStatus));
        assert_eq!(ViewId::from_name("COMMIT"), Ok(ViewId::Commit));
        assert!(ViewId::from_name("Graph").is_err());
    }
}
