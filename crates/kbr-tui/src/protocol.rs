// Message types exchanged between the draft controller and the TUI.
//
// `UiUpdate` flows controller -> TUI, `UserCommand` flows TUI -> controller.

use std::path::PathBuf;

use kbr_core::draft::player::Player;
use kbr_core::draft::state::DraftState;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Coarse screen the client is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the startup probe.
    #[default]
    Loading,
    /// No draft is configured on the backend: show the setup screen.
    Unconfigured,
    /// A draft is in progress.
    Active,
    /// Every pick has been made.
    Finished,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything fetched by one resync: the draft state and the market.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftSnapshot {
    pub state: DraftState,
    pub players: Vec<Player>,
}

impl DraftSnapshot {
    pub fn phase(&self) -> Phase {
        if self.state.is_finished {
            Phase::Finished
        } else {
            Phase::Active
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate (controller -> TUI)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Phase change without draft data (`Loading`, `Unconfigured`).
    /// Any previous snapshot is discarded.
    Phase(Phase),
    /// A fresh resync. Replaces the previous snapshot wholesale.
    Snapshot(Box<DraftSnapshot>),
    /// A mutating request is in flight (`true`) or finished (`false`).
    Busy(bool),
    /// A blocking message for the user.
    Alert(String),
    /// The CSV export was downloaded.
    ExportSaved { path: PathBuf, url: String },
}

// ---------------------------------------------------------------------------
// UserCommand (TUI -> controller)
// ---------------------------------------------------------------------------

/// One team row of the setup form, before logo encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupTeamInput {
    pub name: String,
    /// Path to an image file, or blank for no logo.
    pub logo_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    SubmitSetup {
        league_name: String,
        teams: Vec<SetupTeamInput>,
        n_rounds: u32,
    },
    /// Draft a market player for the team on the clock.
    DraftPlayer { player_name: String },
    Undo,
    Reset,
    Export,
    Refresh,
    Quit,
}
