use ratatui::{style::Style, text::Span};

use crate::{app::ListMode, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for whatever the active list screen is doing.
pub fn for_mode(mode: ListMode) -> Vec<KeyHint> {
    match mode {
        ListMode::Browse => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("←→", "page"),
            KeyHint::new("/", "search"),
            KeyHint::new("1-3", "sort"),
            KeyHint::new("s", "page size"),
            KeyHint::new("c", "create"),
            KeyHint::new("e", "edit"),
            KeyHint::new("d", "delete"),
            KeyHint::new("Enter", "view"),
            KeyHint::new("r", "reload"),
        ],
        ListMode::Search => vec![
            KeyHint::new("Enter", "done"),
            KeyHint::new("Esc", "clear"),
        ],
        ListMode::Create | ListMode::Edit => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "cancel"),
        ],
        ListMode::Detail => vec![KeyHint::new("b", "back"), KeyHint::new("Esc", "back")],
        ListMode::ConfirmDelete(_) => vec![
            KeyHint::new("y", "yes, delete it"),
            KeyHint::new("n", "cancel"),
        ],
    }
}

pub fn global_shortcuts() -> Vec<KeyHint> {
    vec![KeyHint::new("L", "logout"), KeyHint::new("q", "quit")]
}
