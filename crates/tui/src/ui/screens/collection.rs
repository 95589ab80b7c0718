use listing::{DELETE_PROMPT, SortScope};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{ListMode, ListScreen, TableEntity},
    ui::{components::dialog, theme::Theme},
};

/// Searchable, sortable, paginated table for one collection, plus whatever
/// dialog its mode has open.
pub fn render<E: TableEntity>(frame: &mut Frame<'_>, area: Rect, screen: &ListScreen<E>) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, layout[0], screen, &theme);
    render_table(frame, layout[1], screen, &theme);
    render_footer(frame, layout[2], screen, &theme);

    match screen.mode {
        ListMode::Create => dialog::render_form(
            frame,
            area,
            format!("New {}", E::LABEL),
            screen.view.draft(),
            screen.focus,
            &theme,
        ),
        ListMode::Edit => dialog::render_form(
            frame,
            area,
            format!("Edit {}", E::LABEL),
            screen.view.draft(),
            screen.focus,
            &theme,
        ),
        ListMode::Detail => {
            if let Some(record) = screen.detail.as_ref() {
                dialog::render_detail(frame, area, record, &theme);
            }
        }
        ListMode::ConfirmDelete(_) => dialog::render_confirm(frame, area, DELETE_PROMPT, &theme),
        ListMode::Browse | ListMode::Search => {}
    }
}

fn render_header<E: TableEntity>(
    frame: &mut Frame<'_>,
    area: Rect,
    screen: &ListScreen<E>,
    theme: &Theme,
) {
    let searching = screen.mode == ListMode::Search;
    let term = screen.view.search_term();
    let mut line = vec![Span::styled("Search", Style::default().fg(theme.dim)), Span::raw(": ")];

    let shown = if term.is_empty() && !searching {
        "…".to_string()
    } else if searching {
        format!("{term}│")
    } else {
        term.to_string()
    };
    let mut style = Style::default().fg(theme.text);
    if searching {
        style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
    }
    line.push(Span::styled(shown, style));

    line.push(Span::raw("   "));
    line.push(Span::styled("Sort", Style::default().fg(theme.dim)));
    let scope = match screen.view.sort_scope() {
        SortScope::Page => "page",
        SortScope::Filtered => "all",
    };
    line.push(Span::raw(format!(": {scope}")));

    if let Some(err) = screen.view.load_error() {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.to_string(), Style::default().fg(theme.error)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if searching {
            theme.accent
        } else {
            theme.border
        }))
        .title(E::TITLE);
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_table<E: TableEntity>(
    frame: &mut Frame<'_>,
    area: Rect,
    screen: &ListScreen<E>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if screen.view.page_len() == 0 {
        let message = if !screen.view.is_loaded() {
            "Loading…".to_string()
        } else if !screen.view.search_term().is_empty() {
            format!("No results for \"{}\".", screen.view.search_term())
        } else {
            format!("No {} yet. Press c to create one.", E::TITLE.to_lowercase())
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(message, Style::default().fg(theme.dim))))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let sort = screen.view.sort();
    let sorted_column = E::column_of(sort.field);
    let header = Row::new(E::COLUMNS.iter().enumerate().map(|(idx, label)| {
        let text = if idx == sorted_column {
            format!("{label} {}", sort.direction.arrow())
        } else {
            (*label).to_string()
        };
        Cell::from(format!("{text} [{}]", idx + 1))
    }))
    .style(
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::BOLD),
    );

    let rows = screen
        .view
        .page()
        .map(|record| Row::new(record.cells().into_iter().map(Cell::from)))
        .collect::<Vec<_>>();

    let widths = E::COLUMNS.iter().enumerate().map(|(idx, _)| {
        if idx == 0 {
            Constraint::Length(8)
        } else {
            Constraint::Fill(1)
        }
    });

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(Style::default().fg(theme.text))
        .row_highlight_style(
            Style::default()
                .bg(theme.highlight)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    table_state.select(Some(screen.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_footer<E: TableEntity>(
    frame: &mut Frame<'_>,
    area: Rect,
    screen: &ListScreen<E>,
    theme: &Theme,
) {
    let view = &screen.view;
    let line = Line::from(vec![
        Span::raw(format!(" {}", view.summary())),
        Span::styled("  │  ", Style::default().fg(theme.border)),
        Span::raw(format!(
            "Page {} of {}",
            view.current_page(),
            view.total_pages().max(1)
        )),
        Span::styled("  │  ", Style::default().fg(theme.border)),
        Span::styled(
            format!("{} per page", view.page_size()),
            Style::default().fg(theme.text_muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
