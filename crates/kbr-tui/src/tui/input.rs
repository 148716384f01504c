// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the draft
// controller, or into local ViewState mutations (form editing, market
// filters, cursor, team carousel, view toggles).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{ConfirmAction, ViewMode, ViewState};
use crate::protocol::{Phase, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// controller. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events; Windows also reports releases.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // An alert swallows the key that dismisses it
    if view_state.alert.is_some() {
        view_state.alert = None;
        return None;
    }

    if let Some(action) = view_state.confirm {
        return handle_confirm(key_event, view_state, action);
    }

    match view_state.phase {
        Phase::Loading => match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                view_state.confirm = Some(ConfirmAction::Quit);
                None
            }
            _ => None,
        },
        Phase::Unconfigured => handle_setup(key_event, view_state),
        Phase::Active | Phase::Finished => {
            if view_state.filter_mode {
                handle_filter_mode(key_event, view_state)
            } else {
                handle_draft(key_event, view_state)
            }
        }
    }
}

/// Handle key events while a confirmation is pending.
///
/// - `y` confirms (sends the action's command)
/// - `n` or `Esc` cancels
/// - everything else is blocked
fn handle_confirm(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    action: ConfirmAction,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            view_state.confirm = None;
            Some(action.command())
        }
        // q answers yes to the quit prompt only
        KeyCode::Char('q') | KeyCode::Char('Q') if action == ConfirmAction::Quit => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm = None;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Setup screen
// ---------------------------------------------------------------------------

fn handle_setup(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let form = &mut view_state.setup;
    match key_event.code {
        KeyCode::Esc => {
            view_state.confirm = Some(ConfirmAction::Quit);
            None
        }
        KeyCode::Down | KeyCode::Tab => {
            form.focus_next();
            None
        }
        KeyCode::Up | KeyCode::BackTab => {
            form.focus_prev();
            None
        }
        KeyCode::Right => {
            form.adjust(1);
            None
        }
        KeyCode::Left => {
            form.adjust(-1);
            None
        }
        KeyCode::Backspace => {
            form.backspace();
            None
        }
        KeyCode::Enter => {
            if view_state.busy {
                return None;
            }
            match form.submit() {
                Ok(cmd) => Some(cmd),
                Err(message) => {
                    view_state.alert = Some(message);
                    None
                }
            }
        }
        KeyCode::Char(c) => {
            match c {
                '+' if is_count_field(view_state) => view_state.setup.adjust(1),
                '-' if is_count_field(view_state) => view_state.setup.adjust(-1),
                _ => view_state.setup.input_char(c),
            }
            None
        }
        _ => None,
    }
}

fn is_count_field(view_state: &ViewState) -> bool {
    use super::form::SetupField;
    matches!(
        view_state.setup.focused(),
        SetupField::TeamCount | SetupField::RoundCount
    )
}

// ---------------------------------------------------------------------------
// Draft screen
// ---------------------------------------------------------------------------

fn handle_draft(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let finished = view_state.phase == Phase::Finished;
    match key_event.code {
        // Market cursor
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.move_cursor(-1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.move_cursor(1);
            None
        }
        KeyCode::PageUp => {
            view_state.move_cursor(-(page_size() as isize));
            None
        }
        KeyCode::PageDown => {
            view_state.move_cursor(page_size() as isize);
            None
        }

        // Draft the selected player for the team on the clock
        KeyCode::Enter => {
            if finished || view_state.busy || !view_state.sidebar_open {
                return None;
            }
            view_state
                .selected_player()
                .map(|p| UserCommand::DraftPlayer {
                    player_name: p.name.clone(),
                })
        }

        // Market filters
        KeyCode::Char('/') => {
            if !finished {
                view_state.filter_mode = true;
                view_state.sidebar_open = true;
            }
            None
        }
        KeyCode::Char('p') => {
            view_state.filter.cycle_position();
            view_state.market_cursor = 0;
            None
        }
        KeyCode::Char('c') => {
            let options = view_state.club_options();
            view_state.filter.cycle_club(&options);
            view_state.market_cursor = 0;
            None
        }
        KeyCode::Esc => {
            view_state.filter.clear();
            view_state.market_cursor = 0;
            view_state.notice = None;
            None
        }

        // Views
        KeyCode::Tab | KeyCode::Char('v') => {
            view_state.view_mode = match view_state.view_mode {
                ViewMode::Roster => ViewMode::Board,
                ViewMode::Board => ViewMode::Roster,
            };
            None
        }
        KeyCode::Char('s') => {
            view_state.sidebar_open = !view_state.sidebar_open;
            None
        }

        // Team carousel
        KeyCode::Left | KeyCode::Char('h') => {
            if let Some(idx) = view_state.viewed_team_idx() {
                if idx > 0 {
                    view_state.select_team(idx - 1);
                }
            }
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if let Some(idx) = view_state.viewed_team_idx() {
                view_state.select_team(idx + 1);
            }
            None
        }
        KeyCode::Char('<') | KeyCode::Char(',') => {
            view_state.carousel_prev();
            None
        }
        KeyCode::Char('>') | KeyCode::Char('.') => {
            view_state.carousel_next();
            None
        }

        // Main panel scrolling
        KeyCode::Char('[') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Char(']') => {
            scroll_down(view_state, 1);
            None
        }

        // Controller commands
        KeyCode::Char('u') => {
            let can_undo = view_state.draft().is_some_and(|d| d.can_undo());
            if can_undo && !finished && !view_state.busy {
                view_state.confirm = Some(ConfirmAction::Undo);
            }
            None
        }
        KeyCode::Char('R') => {
            if !view_state.busy {
                view_state.confirm = Some(ConfirmAction::Reset);
            }
            None
        }
        KeyCode::Char('r') => Some(UserCommand::Refresh),
        KeyCode::Char('e') => {
            if view_state.busy {
                None
            } else {
                Some(UserCommand::Export)
            }
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm = Some(ConfirmAction::Quit);
            None
        }

        _ => None,
    }
}

/// Handle key events while typing in the market search box.
///
/// - Printable characters are appended to the search text
/// - Backspace removes the last character
/// - Enter keeps the text and leaves filter mode; Esc clears it
/// - Up/Down still move the cursor so a match can be picked right away
fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.filter_mode = false;
            view_state.filter.search.clear();
        }
        KeyCode::Enter => {
            view_state.filter_mode = false;
        }
        KeyCode::Backspace => {
            view_state.filter.search.pop();
            view_state.market_cursor = 0;
        }
        KeyCode::Up => view_state.move_cursor(-1),
        KeyCode::Down => view_state.move_cursor(1),
        KeyCode::Char(c) => {
            view_state.filter.search.push(c);
            view_state.market_cursor = 0;
        }
        _ => {}
    }
    None
}

/// Widget key for scroll state based on the main view mode.
fn active_widget_key(view_state: &ViewState) -> &'static str {
    if view_state.phase == Phase::Finished || view_state.view_mode == ViewMode::Board {
        "board"
    } else {
        "roster"
    }
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let key = active_widget_key(view_state);
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_sub(lines);
}

fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let key = active_widget_key(view_state);
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_add(lines);
}

/// Page size for PageUp/PageDown.
fn page_size() -> usize {
    20
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
