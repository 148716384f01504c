// Confirmation overlay for quit, undo and reset.
//
// Renders a centered modal dialog on top of the current screen while
// `ViewState::confirm` is set.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::ConfirmAction;

const DIALOG_WIDTH: u16 = 44;
const DIALOG_HEIGHT: u16 = 5;

/// Title and question for each action.
pub fn prompt(action: ConfirmAction) -> (&'static str, &'static str) {
    match action {
        ConfirmAction::Quit => (" Quit? ", "Really quit?"),
        ConfirmAction::Undo => (" Undo? ", "Undo the last pick?"),
        ConfirmAction::Reset => (" Reset? ", "Reset the whole draft?"),
    }
}

/// Render the confirmation overlay centered on the screen.
pub fn render(frame: &mut Frame, area: Rect, action: ConfirmAction) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let color = match action {
        ConfirmAction::Reset => Color::Red,
        _ => Color::Yellow,
    };
    let (title, question) = prompt(action);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    let text = Line::from(vec![
        Span::raw(format!("  {} (", question)),
        Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw("/"),
        Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(")"),
    ]);

    let paragraph = Paragraph::new(vec![Line::raw(""), text])
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

/// Compute a centered rectangle of the given size within `area`, clamped to
/// the available space.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
