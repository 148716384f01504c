// Player card rendering shared by the market, roster and pitch widgets.
//
// Compact form: "[ATA] Pedro  Flamengo • #9  €20M" on one line.
// Full form: a few lines with name, position, club, shirt and value.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use kbr_core::draft::player::{format_market_value, Player, Position};

/// Badge colour for a position.
pub fn position_color(position: &Position) -> Color {
    match position {
        Position::Forward => Color::Rgb(0xD9, 0x04, 0x29),
        Position::Midfielder => Color::Rgb(0xF2, 0x99, 0x4A),
        Position::Defender => Color::Rgb(0x8E, 0x44, 0xAD),
        Position::Goalkeeper => Color::Rgb(0xEC, 0x48, 0x99),
        Position::Other(_) => Color::Rgb(0x55, 0x55, 0x55),
    }
}

/// `[ATA]` badge in the position colour.
pub fn badge(position: &Position) -> Span<'static> {
    Span::styled(
        format!("[{:<3}]", position.acronym()),
        Style::default()
            .fg(Color::White)
            .bg(position_color(position))
            .add_modifier(Modifier::BOLD),
    )
}

/// Club plus shirt number when known: `Flamengo • #9`.
pub fn club_label(player: &Player) -> String {
    match player.shirt_number() {
        Some(n) => format!("{} • #{}", player.club, n),
        None => player.club.clone(),
    }
}

/// One-line card.
pub fn compact_line(player: &Player) -> Line<'static> {
    Line::from(vec![
        badge(&player.position),
        Span::raw(" "),
        Span::styled(
            player.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(club_label(player), Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(
            format_market_value(player.market_value),
            Style::default().fg(Color::Green),
        ),
    ])
}

/// Multi-line card for the selected market player.
pub fn full_card(player: &Player) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            badge(&player.position),
            Span::raw(" "),
            Span::styled(
                player.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Position: ", Style::default().fg(Color::DarkGray)),
            Span::raw(player.position.as_str().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Club: ", Style::default().fg(Color::DarkGray)),
            Span::raw(player.club.clone()),
        ]),
    ];
    if let Some(n) = player.shirt_number() {
        lines.push(Line::from(vec![
            Span::styled("Number: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("#{}", n)),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Value: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format_market_value(player.market_value),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines
}
