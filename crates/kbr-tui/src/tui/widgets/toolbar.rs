// Toolbar widget: view tabs and the team carousel.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::carousel::carousel_spans;
use crate::protocol::Phase;
use crate::tui::{ViewMode, ViewState};

/// Render the toolbar into the given area.
///
/// Layout: [Roster] [Board] | ‹ [Time 1] [Time 2*] ... ›
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(draft) = state.draft() else {
        return;
    };

    let mode = if state.phase == Phase::Finished {
        ViewMode::Board
    } else {
        state.view_mode
    };
    let mut spans = vec![Span::raw(" ")];
    spans.extend(tab_spans(mode));
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.extend(carousel_spans(
        &draft.teams,
        state.carousel_offset,
        state.viewed_team_idx(),
        state.active_team_idx(),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// View tabs with the active one highlighted: "[Roster] [Board]".
pub fn tab_spans(active: ViewMode) -> Vec<Span<'static>> {
    let tabs = [(ViewMode::Roster, "Roster"), (ViewMode::Board, "Board")];

    let mut spans = Vec::new();
    for (mode, label) in tabs {
        let style = if mode == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}
