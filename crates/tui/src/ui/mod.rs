pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, ListMode, Screen, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        Screen::Login => {
            screens::login::render(frame, area, state);
            components::toast::render(frame, area, state.toast.as_ref());
        }
        Screen::Dashboard => render_shell(frame, area, state),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Pokemon => screens::collection::render(frame, layout[2], &state.pokemon),
        Section::Users => screens::collection::render(frame, layout[2], &state.users),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state
        .user
        .as_ref()
        .map(|user| user.name.as_str())
        .unwrap_or("-");
    let since = state
        .signed_in_at
        .map(|dt| dt.with_timezone(&chrono::Local).format("%d/%m %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    let refreshed = match state.section {
        Section::Pokemon => state.pokemon.last_refresh,
        Section::Users => state.users.last_refresh,
    };
    let refresh = refreshed
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let load_failed = match state.section {
        Section::Pokemon => state.pokemon.view.load_error().is_some(),
        Section::Users => state.users.view.load_error().is_some(),
    };
    let (status, status_style) = if load_failed {
        ("ERR", Style::default().fg(theme.error))
    } else {
        ("OK", Style::default().fg(theme.positive))
    };

    let line = Line::from(vec![
        Span::styled("Server", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("User", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Since", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {since}  ")),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mode = match state.section {
        Section::Pokemon => state.pokemon.mode,
        Section::Users => state.users.mode,
    };

    let mut parts = Vec::new();
    if mode == ListMode::Browse {
        parts.extend(components::tabs::tab_shortcuts(theme));
        parts.push(components::hints::hint_separator(theme));
    }
    parts.extend(components::hints::hints_to_spans(
        &components::hints::for_mode(mode),
        theme,
    ));
    if mode == ListMode::Browse {
        parts.push(components::hints::hint_separator(theme));
        parts.extend(components::hints::hints_to_spans(
            &components::hints::global_shortcuts(),
            theme,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
