// Alert overlay: a blocking message dismissed by any key.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::confirm::centered_rect;

const MAX_WIDTH: u16 = 60;

/// Render `message` in a centered box sized to fit it.
pub fn render(frame: &mut Frame, area: Rect, message: &str) {
    let width = (message.chars().count() as u16 + 6).clamp(30, MAX_WIDTH);
    let text_width = width.saturating_sub(4).max(1) as usize;
    let wrapped_rows = message.chars().count().div_ceil(text_width).max(1) as u16;
    let dialog_area = centered_rect(width, wrapped_rows + 4, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " Alert ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    let paragraph = Paragraph::new(vec![
        Line::raw(message.to_string()),
        Line::raw(""),
        Line::styled("press any key", Style::default().fg(Color::DarkGray)),
    ])
    .block(block)
    .wrap(Wrap { trim: true })
    .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}
