// Roster widget: the viewed team's picks, position counts and squad value.
//
// Scrollable with [ and ] keys.

use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use kbr_core::draft::player::Position;
use kbr_core::draft::roster::{roster_value, PositionCounts};
use kbr_core::draft::state::Team;

use super::header::team_label;
use super::player_card::{compact_line, position_color};

/// Render the roster of `team` into the given area.
pub fn render(frame: &mut Frame, area: Rect, team: &Team, scroll_offset: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title(team));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [counts_row, list_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
    let counts = PositionCounts::from_players(&team.players);
    frame.render_widget(Paragraph::new(counts_line(&counts)), counts_row);

    if team.players.is_empty() {
        frame.render_widget(
            Paragraph::new("  no player selected yet").style(Style::default().fg(Color::DarkGray)),
            list_area,
        );
        return;
    }

    let visible_rows = list_area.height as usize;
    let total = team.players.len();
    let max_offset = total.saturating_sub(visible_rows);
    let scroll_offset = scroll_offset.min(max_offset);

    let items: Vec<ListItem> = team
        .players
        .iter()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|p| ListItem::new(compact_line(p)))
        .collect();
    frame.render_widget(List::new(items), list_area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// "◆ Urubu FC (5) · €38.5M"
pub fn title(team: &Team) -> String {
    format!(
        " {} ({}) · €{:.1}M ",
        team_label(team),
        team.players.len(),
        roster_value(&team.players)
    )
}

/// Per-position counts in pitch order: "GOL 1  DEF 2  MEI 0  ATA 1".
pub fn counts_line(counts: &PositionCounts) -> Line<'static> {
    let positions = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];
    let mut spans = vec![Span::raw(" ")];
    for pos in positions {
        spans.push(Span::styled(
            pos.acronym(),
            Style::default()
                .fg(position_color(&pos))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}  ", counts.for_position(&pos))));
    }
    if counts.other > 0 {
        spans.push(Span::styled(
            format!("other {}", counts.other),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
