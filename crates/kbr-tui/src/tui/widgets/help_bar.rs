// Help bar: key hints for the current mode, plus busy state and notices.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::Phase;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        hint_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )];
    if state.busy {
        spans.push(Span::styled(
            "  Working...",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(ref notice) = state.notice {
        spans.push(Span::styled(
            format!("  {}", notice),
            Style::default().fg(Color::Green),
        ));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Key hints for the current phase and mode. Undo is only listed when
/// there is a pick to undo.
pub fn hint_text(state: &ViewState) -> String {
    if state.filter_mode {
        return " type:Search | Enter:Done | Esc:Clear".to_string();
    }
    match state.phase {
        Phase::Finished => " q:Quit | e:Export CSV | R:Reset | []:Scroll".to_string(),
        Phase::Active => {
            let mut hints = vec![
                " q:Quit",
                "Enter:Draft",
                "/:Search",
                "p:Pos",
                "c:Club",
                "Tab:View",
                "←→:Team",
                "s:Market",
            ];
            if state.draft().is_some_and(|d| d.can_undo()) {
                hints.push("u:Undo");
            }
            hints.extend(["R:Reset", "e:Export", "r:Refresh"]);
            hints.join(" | ")
        }
        Phase::Loading | Phase::Unconfigured => " q:Quit".to_string(),
    }
}
