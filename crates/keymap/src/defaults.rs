use actions::{ActionType, ViewId};

/// Built-in key bindings as `(view, keystring, action)`.
///
/// User bindings from config are applied on top of these.
pub const DEFAULT_BINDINGS: &[(ViewId, &str, ActionType)] = &[
    // Movement
    (ViewId::All, "<Up>", ActionType::PrevLine),
    (ViewId::All, "k", ActionType::PrevLine),
    (ViewId::All, "<Down>", ActionType::NextLine),
    (ViewId::All, "j", ActionType::NextLine),
    (ViewId::All, "<PageUp>", ActionType::PrevPage),
    (ViewId::All, "<C-b>", ActionType::PrevPage),
    (ViewId::All, "<PageDown>", ActionType::NextPage),
    (ViewId::All, "<C-f>", ActionType::NextPage),
    (ViewId::All, "<C-u>", ActionType::PrevHalfPage),
    (ViewId::All, "<C-d>", ActionType::NextHalfPage),
    (ViewId::All, "<Right>", ActionType::ScrollRight),
    (ViewId::All, "l", ActionType::ScrollRight),
    (ViewId::All, "<Left>", ActionType::ScrollLeft),
    (ViewId::All, "h", ActionType::ScrollLeft),
    (ViewId::All, "<Home>", ActionType::FirstLine),
    (ViewId::All, "gg", ActionType::FirstLine),
    (ViewId::All, "<End>", ActionType::LastLine),
    (ViewId::All, "G", ActionType::LastLine),
    (ViewId::All, "<Enter>", ActionType::Select),
    // View navigation
    (ViewId::All, "<Tab>", ActionType::NextView),
    (ViewId::All, "<C-w>w", ActionType::NextView),
    (ViewId::All, "<C-w><C-w>", ActionType::NextView),
    (ViewId::All, "<S-Tab>", ActionType::PrevView),
    (ViewId::All, "<C-w>W", ActionType::PrevView),
    (ViewId::All, "f", ActionType::FullScreenView),
    (ViewId::All, "<C-w>o", ActionType::FullScreenView),
    (ViewId::All, "<C-w>t", ActionType::ToggleViewLayout),
    (ViewId::All, "<C-w>c", ActionType::RemoveView),
    (ViewId::All, "x", ActionType::RemoveView),
    // Cursor placement
    (ViewId::All, "zz", ActionType::CenterView),
    (ViewId::All, "z.", ActionType::CenterView),
    (ViewId::All, "zt", ActionType::ScrollCursorTop),
    (ViewId::All, "z<Enter>", ActionType::ScrollCursorTop),
    (ViewId::All, "zb", ActionType::ScrollCursorBottom),
    (ViewId::All, "z-", ActionType::ScrollCursorBottom),
    (ViewId::All, "H", ActionType::CursorTopView),
    (ViewId::All, "M", ActionType::CursorMiddleView),
    (ViewId::All, "L", ActionType::CursorBottomView),
    // Prompts and search
    (ViewId::All, ":", ActionType::Prompt),
    (ViewId::All, "/", ActionType::SearchPrompt),
    (ViewId::All, "?", ActionType::ReverseSearchPrompt),
    (ViewId::All, "n", ActionType::SearchFindNext),
    (ViewId::All, "N", ActionType::SearchFindPrev),
    (ViewId::Commit, "<C-q>", ActionType::FilterPrompt),
    (ViewId::Ref, "<C-q>", ActionType::FilterPrompt),
    // Application
    (ViewId::All, "q", ActionType::Exit),
    (ViewId::All, "<C-z>", ActionType::Suspend),
];
