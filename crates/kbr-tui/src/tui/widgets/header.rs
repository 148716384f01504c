// Header widget: league name, live badge, and the team on the clock.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use kbr_core::draft::state::{DraftState, Team};

use crate::tui::ACCENT;

/// Render the header into the given area.
///
/// Layout: [● LIVE] [Round r · Pick n/total] [On the clock: team]
/// Once the draft is over the line reads "Draft finished!".
pub fn render(frame: &mut Frame, area: Rect, draft: &DraftState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            format!(" {} ", draft.league_name),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(status_line(draft)).block(block);
    frame.render_widget(paragraph, area);
}

/// The single status line shown inside the header block.
pub fn status_line(draft: &DraftState) -> Line<'static> {
    let Some(slot) = draft.current_slot() else {
        return Line::from(vec![
            Span::styled(
                " Draft finished! ",
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} picks made", draft.history.len()),
                Style::default().fg(Color::Gray),
            ),
        ]);
    };

    let mut spans = vec![
        Span::styled(
            " ● LIVE ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  Round {} · Pick {}/{}",
                slot.round,
                draft.pick_number(),
                draft.total_picks
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled("  |  On the clock: ", Style::default().fg(Color::Gray)),
    ];
    if let Some(team) = draft.team(slot.team_idx) {
        spans.push(Span::styled(
            team_label(team),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Team name with a `◆` marker when the team uploaded a logo.
pub fn team_label(team: &Team) -> String {
    if team.has_logo() {
        format!("◆ {}", team.name)
    } else {
        team.name.clone()
    }
}
