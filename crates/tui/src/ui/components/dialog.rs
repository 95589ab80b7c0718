use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::{FormDraft, TableEntity},
    ui::theme::Theme,
};

/// A box of at most `width` x `height` centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

fn dialog_block(title: String, color: ratatui::style::Color, theme: &Theme) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

pub fn render_confirm(frame: &mut Frame<'_>, area: Rect, prompt: &str, theme: &Theme) {
    let rect = centered_rect(52, 7, area);
    frame.render_widget(Clear, rect);

    let lines = vec![
        Line::from(Span::styled(prompt, Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.error)),
            Span::raw(" Yes, delete it!   "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" Cancel"),
        ]),
    ];
    let block = dialog_block("Delete".to_string(), theme.warning, theme);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        rect,
    );
}

/// Create/edit form over an edit buffer; `focus` indexes `D::FIELDS`.
pub fn render_form<D: FormDraft>(
    frame: &mut Frame<'_>,
    area: Rect,
    title: String,
    draft: &D,
    focus: usize,
    theme: &Theme,
) {
    let note = draft.note();
    let height = D::FIELDS.len() as u16 + 4 + u16::from(note.is_some());
    let rect = centered_rect(60, height, area);
    frame.render_widget(Clear, rect);

    let mut lines = Vec::new();
    for (idx, label) in D::FIELDS.iter().enumerate() {
        let value = draft.field(idx);
        let shown = if D::SECRET == Some(idx) {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        lines.push(render_field(label, &shown, idx == focus, theme));
    }
    if let Some(note) = note {
        lines.push(Line::from(Span::styled(note, Style::default().fg(theme.dim))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: save • Tab: next • Esc: cancel",
        Style::default().fg(theme.dim),
    )));

    let block = dialog_block(title, theme.accent, theme);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn render_field(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let cursor = if focused { "│" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:<12}"), label_style),
        Span::styled(format!("{value}{cursor}"), Style::default().fg(theme.text)),
    ])
}

pub fn render_detail<E: TableEntity>(frame: &mut Frame<'_>, area: Rect, record: &E, theme: &Theme) {
    let rows = record.detail();
    let rect = centered_rect(60, rows.len() as u16 + 4, area);
    frame.render_widget(Clear, rect);

    let mut lines: Vec<Line<'static>> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<8}"), Style::default().fg(theme.text_muted)),
                Span::styled(value, Style::default().fg(theme.text)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "b/Esc: back",
        Style::default().fg(theme.dim),
    )));

    let title = format!("{} #{}", E::LABEL, record.id());
    let block = dialog_block(title, theme.border, theme);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(60, 20, area);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 10);

        let rect = centered_rect(20, 4, area);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (10, 3, 20, 4));
    }
}
