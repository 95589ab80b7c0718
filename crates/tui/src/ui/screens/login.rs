use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, LoginField},
    ui::{components::dialog::centered_rect, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let card_area = centered_rect(44, 8, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Pokémon admin ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .margin(1)
        .split(inner);

    let login = &state.login;

    let email_focused = login.focus == LoginField::Email;
    render_input(frame, rows[0], "Email", &login.email, false, email_focused, &theme);

    let password_focused = login.focus == LoginField::Password;
    render_input(frame, rows[2], "Password", &login.password, true, password_focused, &theme);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("Server: {}", state.base_url),
            Style::default().fg(theme.dim),
        ))
        .alignment(Alignment::Center),
        Rect {
            x: card_area.x,
            y: card_area.y.saturating_sub(1),
            width: card_area.width,
            height: 1,
        }
        .intersection(area),
    );

    if let Some(message) = &login.message {
        let error_area = Rect {
            x: card_area.x,
            y: card_area.y + card_area.height + 1,
            width: card_area.width,
            height: 1,
        }
        .intersection(area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };

    let display = if is_password {
        format!("{label:<10}{}{cursor}", mask_password(value))
    } else {
        format!("{label:<10}{value}{cursor}")
    };

    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    frame.render_widget(Paragraph::new(Span::styled(display, style)), area);
}

fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}
