//! Filter bar rendering: the draft fields and the edit cursor.

use crate::model::{FilterDraft, FilterField};
use crate::view::Mode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const EDITABLE_FIELDS: [FilterField; 4] = [
    FilterField::Text,
    FilterField::Language,
    FilterField::Keywords,
    FilterField::Topics,
];

/// Render the draft filters.
///
/// In edit mode the active field is highlighted and shows a cursor; the
/// committed search is untouched until Enter.
pub(super) fn render_filter_bar(frame: &mut Frame, area: Rect, draft: &FilterDraft, mode: Mode) {
    let title = match mode {
        Mode::EditFilter(_) => " filters (Tab: next field · Enter: search · Esc: cancel) ",
        Mode::Browse => " filters (/ to edit) ",
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let active = match mode {
        Mode::EditFilter(field) => Some(field),
        Mode::Browse => None,
    };

    let mut spans: Vec<Span> = Vec::new();
    for field in EDITABLE_FIELDS {
        let is_active = active == Some(field);
        let label_style = if is_active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{}:", field.label()), label_style));

        let value = draft.get(field);
        let value_style = if is_active {
            Style::default().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(value.to_string(), value_style));
        if is_active {
            spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }
        spans.push(Span::raw("  "));
    }

    let sort = format!(
        "sort:{} {}",
        draft.draft().sort_key,
        match draft.draft().order {
            crate::model::SortOrder::Desc => "↓",
            crate::model::SortOrder::Asc => "↑",
        }
    );
    spans.push(Span::styled(sort, Style::default().fg(Color::Magenta)));

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
