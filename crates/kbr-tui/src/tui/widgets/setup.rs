// Setup screen: league name, team and round counts, one name and logo path
// per team, and the submit hint.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::form::{SetupField, SetupForm};
use crate::tui::{ViewState, ACCENT};

const FORM_WIDTH: u16 = 72;

/// Render the setup form centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let form = &state.setup;
    let mut lines = form_lines(form);
    lines.push(Line::raw(""));
    lines.push(submit_line(state.busy));

    let height = (lines.len() as u16 + 2).min(area.height);
    let [column] = Layout::horizontal([Constraint::Length(FORM_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [form_area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            " New league ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    let visible = form_area.height.saturating_sub(2) as usize;
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll_for_focus(form.focus, visible) as u16, 0));
    frame.render_widget(paragraph, form_area);
}

/// First visible line so the focused field stays on screen with the submit
/// hint below it when possible.
pub fn scroll_for_focus(focus: usize, visible: usize) -> usize {
    (focus + 3).saturating_sub(visible)
}

/// One line per form field, in focus order.
pub fn form_lines(form: &SetupForm) -> Vec<Line<'static>> {
    (0..form.field_count())
        .map(|idx| {
            let field = form.field_at(idx);
            field_line(form, field, idx == form.focus)
        })
        .collect()
}

fn field_line(form: &SetupForm, field: SetupField, focused: bool) -> Line<'static> {
    let (label, value) = match field {
        SetupField::LeagueName => ("League name".to_string(), text_value(&form.league_name, focused)),
        SetupField::TeamCount => ("Teams".to_string(), stepper(form.n_teams().to_string())),
        SetupField::RoundCount => ("Rounds".to_string(), stepper(form.n_rounds.to_string())),
        SetupField::TeamName(i) => (
            format!("  Team {} name", i + 1),
            text_value(&form.teams[i].name, focused),
        ),
        SetupField::TeamLogo(i) => {
            let path = &form.teams[i].logo_path;
            let value = if path.is_empty() && !focused {
                "(no logo)".to_string()
            } else {
                text_value(path, focused)
            };
            (format!("  Team {} logo", i + 1), value)
        }
    };

    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(ACCENT)),
        Span::styled(format!("{:<18}", label), label_style),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn text_value(text: &str, focused: bool) -> String {
    if focused {
        format!("{}_", text)
    } else {
        text.to_string()
    }
}

fn stepper(value: String) -> String {
    format!("◀ {} ▶", value)
}

/// Submit hint, or the progress label while the league is being created.
pub fn submit_line(busy: bool) -> Line<'static> {
    if busy {
        Line::from(Span::styled(
            "  Creating league...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(vec![
            Span::styled("  Enter", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::raw(" Create league  "),
            Span::styled("←/→", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::raw(" Change counts  "),
            Span::styled("Esc", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit"),
        ])
    }
}
