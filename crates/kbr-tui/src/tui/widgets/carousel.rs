// Team carousel: a window of CAROUSEL_SIZE teams that shifts one team at a
// time.

use std::ops::Range;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use kbr_core::draft::state::Team;

use crate::tui::ACCENT;

/// Number of teams visible at once.
pub const CAROUSEL_SIZE: usize = 5;

pub fn can_prev(offset: usize) -> bool {
    offset > 0
}

pub fn can_next(offset: usize, n_teams: usize) -> bool {
    offset + CAROUSEL_SIZE < n_teams
}

/// Team indices shown for `offset`.
pub fn visible_range(offset: usize, n_teams: usize) -> Range<usize> {
    let start = offset.min(n_teams);
    start..(start + CAROUSEL_SIZE).min(n_teams)
}

/// Carousel spans: `‹ [Time 1] Time 2* ... ›`.
///
/// The viewed team is highlighted and the team on the clock carries a `*`.
/// Arrows are dimmed when the window cannot move that way.
pub fn carousel_spans(
    teams: &[Team],
    offset: usize,
    viewed: Option<usize>,
    on_clock: Option<usize>,
) -> Vec<Span<'static>> {
    let arrow = |enabled: bool, glyph: &'static str| {
        let color = if enabled { Color::White } else { Color::DarkGray };
        Span::styled(glyph, Style::default().fg(color))
    };

    let mut spans = vec![arrow(can_prev(offset), "‹ ")];
    for idx in visible_range(offset, teams.len()) {
        let team = &teams[idx];
        let mut label = team.name.clone();
        if on_clock == Some(idx) {
            label.push('*');
        }
        let style = if viewed == Some(idx) {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else if on_clock == Some(idx) {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans.push(arrow(can_next(offset, teams.len()), "›"));
    spans
}
