//! README overlay rendering.
//!
//! Markdown is rendered to terminal text by `tui_markdown::from_str`, a
//! pure function of the fetched document, applied at draw time. No markup
//! is ever injected anywhere it could execute.

use crate::engine::{DocumentStatus, DocumentViewer};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Render the document overlay over the result list.
pub(super) fn render_readme(frame: &mut Frame, area: Rect, viewer: &DocumentViewer, scroll: u16) {
    let overlay = centered_rect(area, 90, 90);

    let title = match viewer.key() {
        Some(key) => format!(" {key} (Esc to close) "),
        None => " readme (Esc to close) ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(overlay);

    frame.render_widget(Clear, overlay);
    frame.render_widget(block, overlay);

    let paragraph = match viewer.status() {
        DocumentStatus::Loading => {
            Paragraph::new("Fetching README…").style(Style::default().fg(Color::DarkGray))
        }
        DocumentStatus::Shown => {
            let markdown = viewer.markdown().unwrap_or_default();
            Paragraph::new(tui_markdown::from_str(markdown))
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0))
        }
        DocumentStatus::Errored(e) => {
            Paragraph::new(Text::from(format!("Could not load README: {e}")))
                .style(Style::default().fg(Color::Red))
        }
        DocumentStatus::Idle => Paragraph::new(""),
    };

    frame.render_widget(paragraph, inner);
}

/// Centered sub-rectangle taking the given percentage of each dimension.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
