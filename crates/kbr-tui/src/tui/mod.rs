// TUI front end: view state, update handling, frame rendering and the
// terminal event loop.
//
// The TUI owns a `ViewState`. The controller pushes `UiUpdate` messages over
// an mpsc channel; the TUI applies them and re-renders at ~30 fps. Key
// presses either mutate `ViewState` locally (filters, cursor, view mode) or
// become `UserCommand`s for the controller.

pub mod form;
pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::{Alignment, Constraint, Flex, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::info;

use kbr_core::config::SetupDefaults;
use kbr_core::draft::player::Player;
use kbr_core::draft::state::{DraftState, Team};
use kbr_core::market::{club_options, filter_market, MarketFilter, MarketView};

use crate::protocol::{DraftSnapshot, Phase, UiUpdate, UserCommand};
use form::SetupForm;
use layout::build_layout;
use widgets::carousel;

/// Accent colour used across the UI.
pub const ACCENT: Color = Color::Rgb(57, 255, 20);

// ---------------------------------------------------------------------------
// View enums
// ---------------------------------------------------------------------------

/// What the main panel shows while the draft is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Roster list and pitch of the viewed team, side by side.
    #[default]
    Roster,
    /// Round x team grid.
    Board,
}

/// Action waiting for a y/n confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Quit,
    Undo,
    Reset,
}

impl ConfirmAction {
    pub fn command(self) -> UserCommand {
        match self {
            ConfirmAction::Quit => UserCommand::Quit,
            ConfirmAction::Undo => UserCommand::Undo,
            ConfirmAction::Reset => UserCommand::Reset,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the last snapshot plus everything the user controls.
pub struct ViewState {
    pub phase: Phase,
    /// Latest resync. `None` outside of `Active`/`Finished`.
    pub snapshot: Option<DraftSnapshot>,
    /// A mutating request is in flight.
    pub busy: bool,
    /// Blocking message; any key dismisses it.
    pub alert: Option<String>,
    /// Pending y/n confirmation.
    pub confirm: Option<ConfirmAction>,
    /// One-line status message (e.g. where the export was saved).
    pub notice: Option<String>,
    pub setup: SetupForm,
    pub filter: MarketFilter,
    /// Whether keystrokes go to the market search box.
    pub filter_mode: bool,
    /// Selected row of the market list.
    pub market_cursor: usize,
    pub view_mode: ViewMode,
    /// Whether the market sidebar is shown.
    pub sidebar_open: bool,
    /// Team shown in the roster view. Set to the team on the clock when the
    /// first live snapshot arrives, then left to the user.
    pub viewed_team: Option<usize>,
    /// First team index of the carousel window.
    pub carousel_offset: usize,
    /// Per-widget scroll offsets (keyed by widget name).
    pub scroll_offset: HashMap<String, usize>,
    setup_defaults: SetupDefaults,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(SetupDefaults::default())
    }
}

impl ViewState {
    pub fn new(setup_defaults: SetupDefaults) -> Self {
        ViewState {
            phase: Phase::Loading,
            snapshot: None,
            busy: false,
            alert: None,
            confirm: None,
            notice: None,
            setup: SetupForm::from_defaults(&setup_defaults),
            filter: MarketFilter::default(),
            filter_mode: false,
            market_cursor: 0,
            view_mode: ViewMode::Roster,
            sidebar_open: true,
            viewed_team: None,
            carousel_offset: 0,
            scroll_offset: HashMap::new(),
            setup_defaults,
        }
    }

    pub fn draft(&self) -> Option<&DraftState> {
        self.snapshot.as_ref().map(|s| &s.state)
    }

    pub fn players(&self) -> &[Player] {
        self.snapshot
            .as_ref()
            .map(|s| s.players.as_slice())
            .unwrap_or(&[])
    }

    pub fn team_count(&self) -> usize {
        self.draft().map_or(0, |d| d.teams.len())
    }

    /// The filtered, sorted, capped market.
    pub fn market(&self) -> MarketView<'_> {
        filter_market(self.players(), &self.filter)
    }

    pub fn club_options(&self) -> Vec<String> {
        club_options(self.players())
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.market().shown.get(self.market_cursor).copied()
    }

    /// Index of the team on the clock.
    pub fn active_team_idx(&self) -> Option<usize> {
        self.draft()
            .and_then(|d| d.current_slot())
            .map(|slot| slot.team_idx)
    }

    /// Index of the team shown in the roster view.
    pub fn viewed_team_idx(&self) -> Option<usize> {
        self.viewed_team
            .filter(|&i| i < self.team_count())
            .or_else(|| self.active_team_idx())
    }

    pub fn viewed_team(&self) -> Option<&Team> {
        let idx = self.viewed_team_idx()?;
        self.draft().and_then(|d| d.team(idx))
    }

    /// View `idx` and scroll the carousel so it is visible.
    pub fn select_team(&mut self, idx: usize) {
        let n = self.team_count();
        if idx >= n {
            return;
        }
        self.viewed_team = Some(idx);
        if idx < self.carousel_offset {
            self.carousel_offset = idx;
        } else if idx >= self.carousel_offset + carousel::CAROUSEL_SIZE {
            self.carousel_offset = idx + 1 - carousel::CAROUSEL_SIZE;
        }
    }

    pub fn carousel_prev(&mut self) {
        if carousel::can_prev(self.carousel_offset) {
            self.carousel_offset -= 1;
        }
    }

    pub fn carousel_next(&mut self) {
        if carousel::can_next(self.carousel_offset, self.team_count()) {
            self.carousel_offset += 1;
        }
    }

    /// Move the market cursor by `delta` rows, clamped to the shown list.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.market().shown.len();
        if len == 0 {
            self.market_cursor = 0;
            return;
        }
        let next = self.market_cursor as isize + delta;
        self.market_cursor = next.clamp(0, len as isize - 1) as usize;
    }

    fn clamp_cursor(&mut self) {
        let len = self.market().shown.len();
        self.market_cursor = self.market_cursor.min(len.saturating_sub(1));
    }

    /// Forget everything tied to the previous draft.
    fn clear_draft_view(&mut self) {
        self.snapshot = None;
        self.filter.clear();
        self.filter_mode = false;
        self.market_cursor = 0;
        self.view_mode = ViewMode::Roster;
        self.viewed_team = None;
        self.carousel_offset = 0;
        self.scroll_offset.clear();
    }

    fn apply_snapshot(&mut self, snapshot: DraftSnapshot) {
        self.phase = snapshot.phase();
        let n_teams = snapshot.state.teams.len();
        let on_clock = snapshot.state.current_slot().map(|slot| slot.team_idx);
        self.snapshot = Some(snapshot);

        if self.viewed_team.is_some_and(|i| i >= n_teams) {
            self.viewed_team = None;
        }
        if self.viewed_team.is_none() {
            if let Some(idx) = on_clock {
                self.select_team(idx);
            }
        }
        let max_offset = n_teams.saturating_sub(carousel::CAROUSEL_SIZE);
        self.carousel_offset = self.carousel_offset.min(max_offset);
        self.clamp_cursor();
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Phase(phase) => {
            if phase == Phase::Unconfigured && state.phase != Phase::Unconfigured {
                state.setup = SetupForm::from_defaults(&state.setup_defaults);
            }
            state.phase = phase;
            state.clear_draft_view();
        }
        UiUpdate::Snapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Busy(busy) => {
            state.busy = busy;
        }
        UiUpdate::Alert(message) => {
            state.alert = Some(message);
        }
        UiUpdate::ExportSaved { path, url } => {
            state.notice = Some(format!("CSV saved to {} (from {})", path.display(), url));
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame for the current phase, then any overlay.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let area = frame.area();
    match state.phase {
        Phase::Loading => render_loading(frame),
        Phase::Unconfigured => widgets::setup::render(frame, area, state),
        Phase::Active | Phase::Finished => render_draft(frame, state),
    }

    if let Some(action) = state.confirm {
        widgets::confirm::render(frame, area, action);
    }
    if let Some(ref message) = state.alert {
        widgets::alert::render(frame, area, message);
    }
}

fn render_loading(frame: &mut Frame) {
    let [row] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(frame.area());
    let paragraph = Paragraph::new("Loading...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(paragraph, row);
}

fn render_draft(frame: &mut Frame, state: &ViewState) {
    let Some(draft) = state.draft() else {
        render_loading(frame);
        return;
    };
    let finished = state.phase == Phase::Finished;
    let sidebar_open = state.sidebar_open && !finished;
    let layout = build_layout(frame.area(), sidebar_open);

    widgets::header::render(frame, layout.header, draft);
    widgets::toolbar::render(frame, layout.toolbar, state);

    if finished || state.view_mode == ViewMode::Board {
        widgets::board::render(frame, layout.main, state);
    } else {
        let (roster_area, pitch_area) = layout::split_main(layout.main);
        match state.viewed_team() {
            Some(team) => {
                let scroll = state.scroll_offset.get("roster").copied().unwrap_or(0);
                widgets::roster::render(frame, roster_area, team, scroll);
                widgets::pitch::render(frame, pitch_area, team);
            }
            None => {
                frame.render_widget(Paragraph::new("No teams."), layout.main);
            }
        }
    }

    if let Some(sidebar) = layout.sidebar {
        widgets::market::render(frame, sidebar, state);
    }
    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Selects over UI updates, keyboard input and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    setup_defaults: SetupDefaults,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(setup_defaults);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Resize and mouse events: the next tick redraws
                    }
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
