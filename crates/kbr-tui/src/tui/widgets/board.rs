// Draft board widget: one row per round, one column per team.
//
// Cells show the picked player's name and position acronym; the slot on
// the clock is highlighted. Scrollable with [ and ] keys.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use kbr_core::draft::board::{BoardCell, DraftBoard};

use super::header::team_label;
use super::player_card::position_color;
use crate::tui::{ViewState, ACCENT};

/// Render the board for the current snapshot into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(draft) = state.draft() else {
        return;
    };
    let board = DraftBoard::build(draft);

    let title = format!(" Draft Board ({}/{}) ", board.filled(), draft.total_picks);
    let block = Block::default().borders(Borders::ALL).title(title);

    if board.teams.is_empty() {
        frame.render_widget(Paragraph::new("  No teams.").block(block), area);
        return;
    }

    let mut header_cells = vec![Cell::from("Round")];
    header_cells.extend(board.teams.iter().map(|t| Cell::from(team_label(t))));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    // Header row plus borders
    let visible_rows = (area.height as usize).saturating_sub(3);
    let max_offset = board.rows.len().saturating_sub(visible_rows);
    let scroll_offset = state
        .scroll_offset
        .get("board")
        .copied()
        .unwrap_or(0)
        .min(max_offset);

    let rows: Vec<Row> = board
        .rows
        .iter()
        .skip(scroll_offset)
        .map(|row| {
            let mut cells = vec![Cell::from(format!("R{}", row.round))];
            cells.extend(row.cells.iter().map(board_cell));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(6)];
    widths.extend(board.teams.iter().map(|_| Constraint::Fill(1)));

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// One board cell: "Pedro ATA", a highlighted "on the clock", or blank.
pub fn board_cell(cell: &BoardCell) -> Cell<'static> {
    match cell.player {
        Some(player) => Cell::from(Line::from(vec![
            Span::raw(format!("{} ", player.name)),
            Span::styled(
                player.position.acronym(),
                Style::default().fg(position_color(&player.position)),
            ),
        ])),
        None if cell.on_the_clock => Cell::from(Span::styled(
            "on the clock",
            Style::default().fg(Color::Black).bg(ACCENT),
        )),
        None => Cell::from(""),
    }
}
