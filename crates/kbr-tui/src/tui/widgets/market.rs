// Market widget: filterable player list with the selected player's card.
//
// Search box, position and club filters, the capped list sorted by market
// value, and a full card for the row under the cursor.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use kbr_core::market::MarketFilter;

use super::player_card::{compact_line, full_card};
use crate::tui::{ViewState, ACCENT};

/// Rows reserved for the selected player's card (borders included).
const CARD_HEIGHT: u16 = 7;

/// Render the market sidebar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let view = state.market();

    let title_style = if state.phase == crate::protocol::Phase::Active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(build_title(view.total_matches, view.shown.len()), title_style));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [search_row, filter_row, list_area, card_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(CARD_HEIGHT),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(search_line(&state.filter.search, state.filter_mode)),
        search_row,
    );
    frame.render_widget(Paragraph::new(filter_line(&state.filter)), filter_row);

    if view.shown.is_empty() {
        let message = if state.players().is_empty() {
            "  No players available."
        } else {
            "  No players match the filters."
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
            list_area,
        );
    } else {
        let items: Vec<ListItem> = view
            .shown
            .iter()
            .map(|p| ListItem::new(compact_line(p)))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        let mut list_state = ListState::default().with_selected(Some(state.market_cursor));
        frame.render_stateful_widget(list, list_area, &mut list_state);
    }

    let card_block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Selected ");
    let card = match view.shown.get(state.market_cursor) {
        Some(player) => Paragraph::new(full_card(player)),
        None => Paragraph::new("  no player selected")
            .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(card.block(card_block), card_area);
}

/// Block title with the filtered count, noting the display cap when hit.
pub fn build_title(total_matches: usize, shown: usize) -> String {
    if shown < total_matches {
        format!(" Market ({}, showing {}) ", total_matches, shown)
    } else {
        format!(" Market ({}) ", total_matches)
    }
}

/// Search box line, with the placeholder when empty and a cursor while typing.
pub fn search_line(search: &str, typing: bool) -> Line<'static> {
    let mut spans = vec![Span::styled("/ ", Style::default().fg(Color::DarkGray))];
    if search.is_empty() && !typing {
        spans.push(Span::styled(
            "Search player...",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            search.to_string(),
            Style::default().fg(Color::White),
        ));
        if typing {
            spans.push(Span::styled("_", Style::default().fg(ACCENT)));
        }
    }
    Line::from(spans)
}

/// "Pos: All  Club: Flamengo".
pub fn filter_line(filter: &MarketFilter) -> Line<'static> {
    let pos = filter
        .position
        .as_ref()
        .map_or_else(|| "All".to_string(), |p| p.acronym());
    let club = filter.club.clone().unwrap_or_else(|| "All".to_string());
    let value_style = Style::default().fg(Color::Yellow);
    Line::from(vec![
        Span::styled("Pos: ", Style::default().fg(Color::DarkGray)),
        Span::styled(pos, value_style),
        Span::styled("  Club: ", Style::default().fg(Color::DarkGray)),
        Span::styled(club, value_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::fixtures::active_view;
    use crate::tui::widgets::buffer_text;
    use kbr_core::draft::player::Position;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn draw(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(70, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn title_mentions_cap() {
        assert_eq!(build_title(5, 5), " Market (5) ");
        assert_eq!(build_title(240, 100), " Market (240, showing 100) ");
    }

    #[test]
    fn search_line_placeholder() {
        assert_eq!(line_text(&search_line("", false)), "/ Search player...");
        assert_eq!(line_text(&search_line("", true)), "/ _");
        assert_eq!(line_text(&search_line("ped", false)), "/ ped");
    }

    #[test]
    fn filter_line_shows_active_filters() {
        let mut filter = MarketFilter::default();
        assert_eq!(line_text(&filter_line(&filter)), "Pos: All  Club: All");
        filter.position = Some(Position::Defender);
        filter.club = Some("Palmeiras".into());
        assert_eq!(
            line_text(&filter_line(&filter)),
            "Pos: DEF  Club: Palmeiras"
        );
    }

    #[test]
    fn render_lists_players_by_value() {
        let text = draw(&active_view(2));
        assert!(text.contains("Market (5)"));
        let pedro = text.find("Pedro").unwrap();
        let hulk = text.find("Hulk").unwrap();
        assert!(pedro < hulk);
        assert!(text.contains("Value: €20M"), "selected card shows Pedro");
    }

    #[test]
    fn render_with_no_matches() {
        let mut state = active_view(2);
        state.filter.search = "zzz".into();
        let text = draw(&state);
        assert!(text.contains("No players match the filters."));
        assert!(text.contains("no player selected"));
    }

    #[test]
    fn render_does_not_panic_in_tiny_area() {
        let backend = ratatui::backend::TestBackend::new(10, 4);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = active_view(2);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
