//! Status line rendering.

use crate::engine::{SearchSession, SessionStatus};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Render the one-row status line: session state on the left, key hints on
/// the right (dropped first when the terminal is narrow).
pub(super) fn render_status(frame: &mut Frame, area: Rect, session: &SearchSession) {
    let (text, style) = match &session.status {
        SessionStatus::Idle if session.generation == 0 => (
            "press / to enter a search".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        SessionStatus::Idle => (
            format!(
                "{} results · page {}",
                session.result_count(),
                session.next_page
            ),
            Style::default(),
        ),
        SessionStatus::Loading => (
            format!("loading page {}…", session.next_page),
            Style::default().fg(Color::Yellow),
        ),
        SessionStatus::Exhausted => (
            format!("{} results · all pages loaded", session.result_count()),
            Style::default().fg(Color::Green),
        ),
        SessionStatus::Errored(e) => (
            format!("error: {e} · press r to retry"),
            Style::default().fg(Color::Red),
        ),
    };

    let hints = " j/k move · Enter readme · s sort · o order · q quit";
    let mut spans = vec![Span::styled(text.clone(), style)];
    if (text.len() + hints.len()) < area.width as usize {
        spans.push(Span::styled(
            hints.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
