// Pitch widget: the viewed team laid out by line, attack at the top.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use kbr_core::draft::roster::PitchLines;
use kbr_core::draft::state::Team;

use super::player_card::position_color;

const PITCH_GREEN: Color = Color::Rgb(0x1B, 0x5E, 0x20);

/// Render the pitch for `team` into the given area.
pub fn render(frame: &mut Frame, area: Rect, team: &Team) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PITCH_GREEN))
        .title(" Pitch ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = PitchLines::from_players(&team.players);
    let rows = Layout::vertical([Constraint::Ratio(1, 4); 4]).split(inner);

    for ((position, players), row) in lines.top_to_bottom().iter().zip(rows.iter()) {
        let header = Line::from(vec![
            Span::styled(
                format!("{} ", position.acronym()),
                Style::default()
                    .fg(position_color(position))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("({})", players.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let names = Line::from(line_names(players)).centered();
        let paragraph = Paragraph::new(vec![header, names]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, *row);
    }
}

/// Player names of one line, joined for display. Empty lines show a dash.
pub fn line_names(players: &[&kbr_core::draft::player::Player]) -> String {
    if players.is_empty() {
        return "-".to_string();
    }
    players
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join("  ")
}
