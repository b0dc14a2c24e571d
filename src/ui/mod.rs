mod helpers;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, NoticeLevel};
use crate::theme::Theme;
use crate::tree_item::Row;
use self::helpers::{help_keybind_line, themed_block};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());
    draw_tree(frame, app, layout[0]);
    draw_footer(frame, app, layout[1]);
}

fn draw_tree(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block = themed_block(&app.theme).title(app.view_title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Remembered for mouse hit-testing and paging.
    app.tree_rect = inner;
    app.last_viewport = inner.height as usize;
    app.ensure_visible();

    let end = (app.scroll + inner.height as usize).min(app.rows.len());
    let lines: Vec<Line<'_>> = app.rows[app.scroll..end]
        .iter()
        .enumerate()
        .map(|(i, row)| row_line(row, app.scroll + i == app.selected, &app.theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn row_line(row: &Row, selected: bool, theme: &Theme) -> Line<'static> {
    let fg = Style::default().fg(theme.fg);
    let mut spans = Vec::new();
    if !row.prefix.is_empty() || !row.connector.is_empty() {
        spans.push(Span::styled(
            format!("{}{}", row.prefix, row.connector),
            Style::default().fg(theme.muted),
        ));
    }
    spans.push(Span::styled("[", fg));
    if row.checked {
        spans.push(Span::styled("•", Style::default().fg(theme.accent)));
    } else {
        spans.push(Span::styled(" ", fg));
    }
    spans.push(Span::styled("] ", fg));
    if row.is_dir {
        let arrow = if row.expanded { "▼ " } else { "► " };
        spans.push(Span::styled(arrow, fg));
        spans.push(Span::styled(
            row.name.clone(),
            Style::default().fg(theme.dir),
        ));
    } else {
        spans.push(Span::styled(row.name.clone(), fg));
    }
    let mut line = Line::from(spans);
    if selected {
        line = line.style(
            Style::default()
                .bg(theme.bg_alt)
                .add_modifier(Modifier::BOLD),
        );
    }
    line
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let notice_width = app
        .notice
        .as_ref()
        .map(|n| n.text.as_str().width() as u16 + 1)
        .unwrap_or(0);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(notice_width)])
        .split(area);

    let help = help_keybind_line(
        &[
            ("space", "check"),
            ("enter", "expand"),
            ("h", "hidden"),
            ("r", "rescan"),
            ("c", "copy"),
            ("q", "quit"),
        ],
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD),
        Style::default().fg(app.theme.fg),
        Style::default().fg(app.theme.muted),
    );
    frame.render_widget(Paragraph::new(help), cols[0]);

    if let Some(notice) = &app.notice {
        let color = match notice.level {
            NoticeLevel::Ok => app.theme.ok,
            NoticeLevel::Warn => app.theme.warn,
            NoticeLevel::Error => app.theme.error,
        };
        let text = Paragraph::new(notice.text.clone())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Right);
        frame.render_widget(text, cols[1]);
    }
}
