//! Result list rendering.

use crate::engine::{SearchSession, SessionStatus};
use crate::model::RepoRecord;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// Render the scrollable result list.
///
/// `offset` is the index of the first visible record; `selected` the
/// highlighted one. One row past the last record, a trailer row reflects
/// the session status (the on-screen face of the pagination sentinel).
pub(super) fn render_results(
    frame: &mut Frame,
    area: Rect,
    session: &SearchSession,
    selected: usize,
    offset: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" repositories ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = inner.height as usize;
    let width = inner.width as usize;
    let records = session.records();

    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for (index, record) in records
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
    {
        lines.push(record_row(record, index == selected, width));
    }

    // Trailer row, shown only while it fits the viewport.
    if lines.len() < height {
        match &session.status {
            SessionStatus::Loading => lines.push(Line::from(Span::styled(
                format!("  loading page {}…", session.next_page),
                Style::default().fg(Color::DarkGray),
            ))),
            SessionStatus::Exhausted => lines.push(Line::from(Span::styled(
                "  — end of results —",
                Style::default().fg(Color::DarkGray),
            ))),
            SessionStatus::Idle if records.is_empty() && session.generation > 0 => {
                lines.push(Line::from(Span::styled(
                    "  no matching repositories",
                    Style::default().fg(Color::DarkGray),
                )))
            }
            _ => {}
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// One record as a single styled row, truncated to `width`.
fn record_row(record: &RepoRecord, selected: bool, width: usize) -> Line<'static> {
    let base = if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };

    let marker = if selected { "> " } else { "  " };
    let name = record.full_name.clone();
    let stars = format!("  ★ {}", record.stars);
    let language = record
        .language
        .as_deref()
        .map(|l| format!("  [{l}]"))
        .unwrap_or_default();
    let updated = record
        .updated_at
        .map(|t| format!("  {}", t.format("%Y-%m-%d")))
        .unwrap_or_default();

    let used = marker.width() + name.width() + stars.width() + language.width() + updated.width();
    let description = record
        .description
        .as_deref()
        .map(|d| {
            let remaining = width.saturating_sub(used + 3);
            format!("  {}", truncate_width(d, remaining))
        })
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(marker.to_string(), base),
        Span::styled(name, base.add_modifier(Modifier::BOLD)),
        Span::styled(stars, base.fg(Color::Yellow)),
        Span::styled(language, base.fg(Color::Cyan)),
        Span::styled(updated, base.fg(Color::DarkGray)),
        Span::styled(description, base.fg(Color::Gray)),
    ])
}

/// Truncate `s` to at most `max` display columns, appending an ellipsis
/// when anything was cut.
pub(super) fn truncate_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_width("hello", 10), "hello");
        assert_eq!(truncate_width("hello", 5), "hello");
    }

    #[test]
    fn long_strings_are_cut_with_ellipsis() {
        assert_eq!(truncate_width("hello world", 6), "hello…");
    }

    #[test]
    fn zero_width_yields_empty() {
        assert_eq!(truncate_width("hello", 0), "");
    }

    #[test]
    fn wide_characters_count_double() {
        // Each CJK glyph occupies two columns.
        let s = "日本語テキスト";
        let out = truncate_width(s, 7);
        assert!(out.width() <= 7, "width {} exceeds 7", out.width());
        assert!(out.ends_with('…'));
    }
}
