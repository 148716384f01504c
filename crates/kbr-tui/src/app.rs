// Draft controller: the application event loop.
//
// Owns the backend handle and the authoritative snapshot. Every mutating
// command is forwarded to the backend and followed by a full resync; the
// resulting snapshot is pushed to the TUI as a single `UiUpdate`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use kbr_core::api::{ApiError, DraftBackend, TeamSetup};
use kbr_core::draft::state::check_pick_advanced;
use kbr_core::export::save_export;
use kbr_core::logo;

use crate::protocol::{DraftSnapshot, Phase, SetupTeamInput, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub backend: Arc<dyn DraftBackend>,
    /// Directory CSV exports are written to.
    pub export_dir: PathBuf,
    pub phase: Phase,
    /// Last resync result. `None` until a configured draft was loaded.
    pub snapshot: Option<DraftSnapshot>,
}

impl AppState {
    pub fn new(backend: Arc<dyn DraftBackend>, export_dir: PathBuf) -> Self {
        AppState {
            backend,
            export_dir,
            phase: Phase::Loading,
            snapshot: None,
        }
    }

    /// Probe the backend root and load the draft when one is configured.
    ///
    /// A failed probe is logged and treated as "not configured".
    pub async fn startup(&mut self, ui_tx: &mpsc::Sender<UiUpdate>) {
        self.snapshot = None;
        self.set_phase(Phase::Loading, ui_tx).await;

        let configured = match self.backend.get_setup_state().await {
            Ok(status) => status.setup,
            Err(e) => {
                warn!("Setup probe failed, showing setup screen: {}", e);
                false
            }
        };

        if !configured {
            info!("No draft configured on the backend");
            self.set_phase(Phase::Unconfigured, ui_tx).await;
            return;
        }

        if let Err(e) = self.resync().await {
            error!("Initial resync failed: {:#}", e);
            self.set_phase(Phase::Unconfigured, ui_tx).await;
            return;
        }
        self.push_snapshot(ui_tx).await;
    }

    /// Fetch state then players and replace the snapshot.
    pub async fn resync(&mut self) -> anyhow::Result<()> {
        let state = self
            .backend
            .get_state()
            .await
            .context("failed to fetch draft state")?;
        let players = self
            .backend
            .get_players()
            .await
            .context("failed to fetch market")?;

        if !state.order_is_consistent() {
            warn!(
                "Draft order has {} entries but total_picks is {}",
                state.draft_order.len(),
                state.total_picks
            );
        }

        debug!(
            "Resynced: pick {}/{}, {} players on the market",
            state.pick_number(),
            state.total_picks,
            players.len()
        );

        let snapshot = DraftSnapshot { state, players };
        self.phase = snapshot.phase();
        self.snapshot = Some(snapshot);
        Ok(())
    }

    async fn set_phase(&mut self, phase: Phase, ui_tx: &mpsc::Sender<UiUpdate>) {
        self.phase = phase;
        let _ = ui_tx.send(UiUpdate::Phase(phase)).await;
    }

    async fn push_snapshot(&self, ui_tx: &mpsc::Sender<UiUpdate>) {
        if let Some(ref snapshot) = self.snapshot {
            let _ = ui_tx
                .send(UiUpdate::Snapshot(Box::new(snapshot.clone())))
                .await;
        }
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Create a league, then confirm it through the root probe before
    /// loading it.
    pub async fn submit_setup(
        &mut self,
        league_name: &str,
        teams: &[SetupTeamInput],
        n_rounds: u32,
    ) -> anyhow::Result<()> {
        if teams.iter().any(|t| t.name.trim().is_empty()) {
            bail!("Fill in the name of every team");
        }

        let mut payload = Vec::with_capacity(teams.len());
        for team in teams {
            let logo = logo::logo_field(&team.logo_path)?;
            payload.push(TeamSetup {
                name: team.name.clone(),
                logo,
            });
        }

        self.backend
            .setup_draft(league_name, &payload, n_rounds)
            .await
            .context("setup request failed")?;

        let status = self
            .backend
            .get_setup_state()
            .await
            .context("setup probe failed")?;
        if !status.setup {
            bail!("the backend still reports no configured draft");
        }

        self.resync().await?;
        info!("League '{}' created", league_name);
        Ok(())
    }

    /// Draft `player_name` for the team on the clock.
    pub async fn draft_player(&mut self, player_name: &str) -> anyhow::Result<()> {
        let Some(before) = self.snapshot.as_ref().map(|s| s.state.clone()) else {
            bail!("no draft is loaded");
        };
        let Some(slot) = before.current_slot() else {
            bail!("the draft is already finished");
        };

        info!(
            "Pick #{}: {} for team {} (round {})",
            before.pick_number(),
            player_name,
            slot.team_idx,
            slot.round
        );
        self.backend.make_pick(slot.team_idx, player_name).await?;
        self.resync().await?;

        if let Some(ref after) = self.snapshot {
            if !check_pick_advanced(&before, &after.state) {
                warn!(
                    "Backend contract violation: pick index went from {} to {} after a pick",
                    before.current_pick_idx, after.state.current_pick_idx
                );
            }
        }
        Ok(())
    }

    pub async fn undo(&mut self) -> anyhow::Result<()> {
        let can_undo = self
            .snapshot
            .as_ref()
            .is_some_and(|s| s.state.can_undo());
        if !can_undo {
            debug!("Undo ignored: no picks to undo");
            return Ok(());
        }
        self.backend.undo_pick().await?;
        self.resync().await?;
        info!("Last pick undone");
        Ok(())
    }

    /// Reset the backend and drop all local state.
    pub async fn reset(&mut self) -> anyhow::Result<()> {
        self.backend.reset_draft().await.context("reset request failed")?;
        self.snapshot = None;
        info!("Draft reset");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the controller loop.
///
/// Runs the startup probe, then processes `UserCommand`s one at a time until
/// `Quit` arrives or the command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Controller loop started");
    state.startup(&ui_tx).await;

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                handle_user_command(&mut state, cmd, &ui_tx).await;
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    info!("Controller loop exiting");
    Ok(())
}

/// Handle a single command from the TUI.
pub async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SubmitSetup {
            league_name,
            teams,
            n_rounds,
        } => {
            let _ = ui_tx.send(UiUpdate::Busy(true)).await;
            match state.submit_setup(&league_name, &teams, n_rounds).await {
                Ok(()) => state.push_snapshot(ui_tx).await,
                Err(e) => report(ui_tx, "Failed to create league", &e).await,
            }
            let _ = ui_tx.send(UiUpdate::Busy(false)).await;
        }
        UserCommand::DraftPlayer { player_name } => {
            let _ = ui_tx.send(UiUpdate::Busy(true)).await;
            match state.draft_player(&player_name).await {
                Ok(()) => state.push_snapshot(ui_tx).await,
                Err(e) => report(ui_tx, "Could not draft player", &e).await,
            }
            let _ = ui_tx.send(UiUpdate::Busy(false)).await;
        }
        UserCommand::Undo => {
            let _ = ui_tx.send(UiUpdate::Busy(true)).await;
            match state.undo().await {
                Ok(()) => state.push_snapshot(ui_tx).await,
                Err(e) => report(ui_tx, "Could not undo pick", &e).await,
            }
            let _ = ui_tx.send(UiUpdate::Busy(false)).await;
        }
        UserCommand::Reset => {
            let _ = ui_tx.send(UiUpdate::Busy(true)).await;
            match state.reset().await {
                Ok(()) => state.startup(ui_tx).await,
                Err(e) => report(ui_tx, "Could not reset draft", &e).await,
            }
            let _ = ui_tx.send(UiUpdate::Busy(false)).await;
        }
        UserCommand::Export => {
            let _ = ui_tx.send(UiUpdate::Busy(true)).await;
            match save_export(state.backend.as_ref(), &state.export_dir).await {
                Ok(saved) => {
                    let _ = ui_tx
                        .send(UiUpdate::ExportSaved {
                            path: saved.path,
                            url: saved.url,
                        })
                        .await;
                }
                Err(e) => {
                    let e = anyhow::Error::new(e);
                    report(ui_tx, "Export failed", &e).await;
                }
            }
            let _ = ui_tx.send(UiUpdate::Busy(false)).await;
        }
        UserCommand::Refresh => {
            if state.snapshot.is_some() {
                match state.resync().await {
                    Ok(()) => state.push_snapshot(ui_tx).await,
                    Err(e) => report(ui_tx, "Could not refresh", &e).await,
                }
            } else {
                state.startup(ui_tx).await;
            }
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

/// Log a failed operation and raise an alert.
async fn report(ui_tx: &mpsc::Sender<UiUpdate>, what: &str, err: &anyhow::Error) {
    error!("{}: {:#}", what, err);
    let _ = ui_tx.send(UiUpdate::Alert(alert_text(what, err))).await;
}

/// `"<what>: <reason>"`, preferring the backend's own message.
pub fn alert_text(what: &str, err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api) => format!("{what}: {}", api.user_message()),
        None => format!("{what}: {err}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kbr_core::api::SetupStatus;
    use kbr_core::draft::player::{Player, Position};
    use kbr_core::draft::state::{DraftSlot, DraftState, PickHistory, Team};
    use serde_json::Value;
    use std::path::Path;
    use std::sync::Mutex;

    // -----------------------------------------------------------------------
    // Scripted backend
    // -----------------------------------------------------------------------

    /// Serves fixed responses and records every call.
    #[derive(Default)]
    struct ScriptedBackend {
        setup: Mutex<bool>,
        state: Mutex<DraftState>,
        players: Mutex<Vec<Player>>,
        /// When set, `make_pick` fails with this backend message.
        reject_pick: Option<String>,
        /// When set, `make_pick` leaves the state untouched.
        stall_pick: bool,
        /// When false, `setup_draft` does not flip the setup flag.
        setup_takes_effect: bool,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn configured(state: DraftState, players: Vec<Player>) -> Self {
            ScriptedBackend {
                setup: Mutex::new(true),
                state: Mutex::new(state),
                players: Mutex::new(players),
                setup_takes_effect: true,
                ..Default::default()
            }
        }

        fn unconfigured() -> Self {
            ScriptedBackend {
                setup_takes_effect: true,
                ..Default::default()
            }
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DraftBackend for ScriptedBackend {
        async fn get_setup_state(&self) -> Result<SetupStatus, ApiError> {
            self.record("root");
            Ok(SetupStatus {
                setup: *self.setup.lock().unwrap(),
                message: None,
            })
        }

        async fn setup_draft(
            &self,
            league_name: &str,
            teams: &[TeamSetup],
            n_rounds: u32,
        ) -> Result<Value, ApiError> {
            self.record(format!("setup {league_name} {} {n_rounds}", teams.len()));
            if self.setup_takes_effect {
                *self.state.lock().unwrap() = two_team_state();
                *self.setup.lock().unwrap() = true;
            }
            Ok(serde_json::json!({"message": "Draft setup successfully"}))
        }

        async fn get_state(&self) -> Result<DraftState, ApiError> {
            self.record("state");
            Ok(self.state.lock().unwrap().clone())
        }

        async fn get_players(&self) -> Result<Vec<Player>, ApiError> {
            self.record("players");
            Ok(self.players.lock().unwrap().clone())
        }

        async fn make_pick(&self, team_idx: usize, player_name: &str) -> Result<Value, ApiError> {
            self.record(format!("pick {team_idx} {player_name}"));
            if let Some(ref message) = self.reject_pick {
                return Err(ApiError::Rejected {
                    endpoint: "/api/pick".into(),
                    status: 400,
                    message: message.clone(),
                });
            }
            if !self.stall_pick {
                let mut state = self.state.lock().unwrap();
                let mut players = self.players.lock().unwrap();
                if let Some(pos) = players.iter().position(|p| p.name == player_name) {
                    let player = players.remove(pos);
                    let slot = state.draft_order[state.current_pick_idx];
                    state.teams[slot.team_idx].players.push(player.clone());
                    let pick_overall = state.current_pick_idx + 1;
                    state.history.push(PickHistory {
                        round: slot.round,
                        pick_overall,
                        team_idx: slot.team_idx,
                        player,
                    });
                    state.current_pick_idx += 1;
                    state.is_finished = state.current_pick_idx >= state.total_picks;
                }
            }
            Ok(serde_json::json!({"message": "ok"}))
        }

        async fn reset_draft(&self) -> Result<Value, ApiError> {
            self.record("reset");
            *self.setup.lock().unwrap() = false;
            *self.state.lock().unwrap() = DraftState::default();
            Ok(serde_json::json!({"message": "Draft reset"}))
        }

        async fn undo_pick(&self) -> Result<Value, ApiError> {
            self.record("undo");
            let mut state = self.state.lock().unwrap();
            if let Some(last) = state.history.pop() {
                state.teams[last.team_idx].players.pop();
                self.players.lock().unwrap().push(last.player);
                state.current_pick_idx -= 1;
                state.is_finished = false;
            }
            Ok(serde_json::json!({"message": "Undone"}))
        }

        fn export_url(&self) -> String {
            "http://localhost:8000/api/export".into()
        }

        async fn download_export(&self, dest: &Path) -> Result<u64, ApiError> {
            self.record("export");
            let body = "player_id,Time Escolhido,Nome,Posição,Valor\n";
            std::fs::write(dest, body).map_err(|source| ApiError::Io {
                path: dest.display().to_string(),
                source,
            })?;
            Ok(body.len() as u64)
        }
    }

    // -----------------------------------------------------------------------
    // Fixtures
    // -----------------------------------------------------------------------

    fn two_team_state() -> DraftState {
        let teams = (0..2)
            .map(|i| Team {
                id: i,
                name: format!("Time {}", i + 1),
                logo: Some(String::new()),
                players: Vec::new(),
            })
            .collect();
        let draft_order = vec![
            DraftSlot { team_idx: 0, round: 1 },
            DraftSlot { team_idx: 1, round: 1 },
            DraftSlot { team_idx: 1, round: 2 },
            DraftSlot { team_idx: 0, round: 2 },
        ];
        DraftState {
            league_name: "Liga".into(),
            teams,
            current_pick_idx: 0,
            total_picks: 4,
            draft_order,
            history: Vec::new(),
            is_finished: false,
        }
    }

    fn market() -> Vec<Player> {
        vec![
            Player::new("Pedro", Position::Forward, "Flamengo", 20.0),
            Player::new("Arrascaeta", Position::Midfielder, "Flamengo", 18.0),
            Player::new("Weverton", Position::Goalkeeper, "Palmeiras", 2.0),
            Player::new("Gustavo Gómez", Position::Defender, "Palmeiras", 6.5),
        ]
    }

    fn setup(
        backend: ScriptedBackend,
    ) -> (Arc<ScriptedBackend>, AppState, mpsc::Sender<UiUpdate>, mpsc::Receiver<UiUpdate>) {
        let backend = Arc::new(backend);
        let state = AppState::new(backend.clone(), std::env::temp_dir().join("kbr_app_test"));
        let (ui_tx, ui_rx) = mpsc::channel(64);
        (backend, state, ui_tx, ui_rx)
    }

    fn drain(rx: &mut mpsc::Receiver<UiUpdate>) -> Vec<UiUpdate> {
        let mut out = Vec::new();
        while let Ok(update) = rx.try_recv() {
            out.push(update);
        }
        out
    }

    fn alerts(updates: &[UiUpdate]) -> Vec<String> {
        updates
            .iter()
            .filter_map(|u| match u {
                UiUpdate::Alert(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Tests: startup
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn startup_without_setup_shows_setup_screen() {
        let (backend, mut state, ui_tx, mut ui_rx) = setup(ScriptedBackend::unconfigured());
        state.startup(&ui_tx).await;

        assert_eq!(state.phase, Phase::Unconfigured);
        assert!(state.snapshot.is_none());
        assert_eq!(backend.calls(), vec!["root"]);
        assert_eq!(
            drain(&mut ui_rx),
            vec![
                UiUpdate::Phase(Phase::Loading),
                UiUpdate::Phase(Phase::Unconfigured)
            ]
        );
    }

    #[tokio::test]
    async fn startup_with_setup_resyncs_state_then_players() {
        let (backend, mut state, ui_tx, mut ui_rx) =
            setup(ScriptedBackend::configured(two_team_state(), market()));
        state.startup(&ui_tx).await;

        assert_eq!(state.phase, Phase::Active);
        assert_eq!(backend.calls(), vec!["root", "state", "players"]);
        let updates = drain(&mut ui_rx);
        assert!(matches!(updates.last(), Some(UiUpdate::Snapshot(s)) if s.players.len() == 4));
    }

    #[tokio::test]
    async fn startup_with_finished_draft_goes_to_finished() {
        let mut finished = two_team_state();
        finished.current_pick_idx = 4;
        finished.is_finished = true;
        let (_backend, mut state, ui_tx, _ui_rx) =
            setup(ScriptedBackend::configured(finished, Vec::new()));
        state.startup(&ui_tx).await;
        assert_eq!(state.phase, Phase::Finished);
    }

    // -----------------------------------------------------------------------
    // Tests: setup
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn setup_with_blank_team_name_sends_nothing() {
        let (backend, mut state, ui_tx, mut ui_rx) = setup(ScriptedBackend::unconfigured());
        let teams = vec![
            SetupTeamInput {
                name: "Time 1".into(),
                logo_path: String::new(),
            },
            SetupTeamInput {
                name: "   ".into(),
                logo_path: String::new(),
            },
        ];
        handle_user_command(
            &mut state,
            UserCommand::SubmitSetup {
                league_name: "Liga".into(),
                teams,
                n_rounds: 2,
            },
            &ui_tx,
        )
        .await;

        assert!(backend.calls().is_empty());
        let alerts = alerts(&drain(&mut ui_rx));
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("name of every team"));
    }

    #[tokio::test]
    async fn setup_with_unreadable_logo_alerts() {
        let (backend, mut state, ui_tx, mut ui_rx) = setup(ScriptedBackend::unconfigured());
        let teams = vec![
            SetupTeamInput {
                name: "Time 1".into(),
                logo_path: "/no/such/logo.png".into(),
            },
            SetupTeamInput {
                name: "Time 2".into(),
                logo_path: String::new(),
            },
        ];
        handle_user_command(
            &mut state,
            UserCommand::SubmitSetup {
                league_name: "Liga".into(),
                teams,
                n_rounds: 2,
            },
            &ui_tx,
        )
        .await;

        assert!(backend.calls().is_empty());
        assert!(alerts(&drain(&mut ui_rx))[0].contains("logo.png"));
    }

    #[tokio::test]
    async fn setup_success_reprobes_and_loads() {
        let (backend, mut state, ui_tx, mut ui_rx) = setup(ScriptedBackend::unconfigured());
        *backend.players.lock().unwrap() = market();
        let teams = vec![
            SetupTeamInput {
                name: "Time 1".into(),
                logo_path: String::new(),
            },
            SetupTeamInput {
                name: "Time 2".into(),
                logo_path: String::new(),
            },
        ];
        handle_user_command(
            &mut state,
            UserCommand::SubmitSetup {
                league_name: "Liga".into(),
                teams,
                n_rounds: 2,
            },
            &ui_tx,
        )
        .await;

        assert_eq!(
            backend.calls(),
            vec!["setup Liga 2 2", "root", "state", "players"]
        );
        assert_eq!(state.phase, Phase::Active);
        let updates = drain(&mut ui_rx);
        assert_eq!(updates.first(), Some(&UiUpdate::Busy(true)));
        assert_eq!(updates.last(), Some(&UiUpdate::Busy(false)));
        assert!(updates.iter().any(|u| matches!(u, UiUpdate::Snapshot(_))));
    }

    #[tokio::test]
    async fn setup_not_confirmed_by_probe_alerts() {
        let backend = ScriptedBackend {
            setup_takes_effect: false,
            ..Default::default()
        };
        let (_backend, mut state, ui_tx, mut ui_rx) = setup(backend);
        handle_user_command(
            &mut state,
            UserCommand::SubmitSetup {
                league_name: "Liga".into(),
                teams: vec![
                    SetupTeamInput {
                        name: "A".into(),
                        logo_path: String::new(),
                    },
                    SetupTeamInput {
                        name: "B".into(),
                        logo_path: String::new(),
                    },
                ],
                n_rounds: 1,
            },
            &ui_tx,
        )
        .await;

        assert!(state.snapshot.is_none());
        let alerts = alerts(&drain(&mut ui_rx));
        assert!(alerts[0].starts_with("Failed to create league"));
    }

    // -----------------------------------------------------------------------
    // Tests: picks
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn pick_uses_team_on_the_clock_and_resyncs() {
        let mut on_clock = two_team_state();
        on_clock.current_pick_idx = 2; // round 2 starts with team 1
        let (backend, mut state, ui_tx, mut ui_rx) =
            setup(ScriptedBackend::configured(on_clock, market()));
        state.startup(&ui_tx).await;
        drain(&mut ui_rx);

        handle_user_command(
            &mut state,
            UserCommand::DraftPlayer {
                player_name: "Pedro".into(),
            },
            &ui_tx,
        )
        .await;

        let calls = backend.calls();
        assert_eq!(&calls[3..], &["pick 1 Pedro", "state", "players"]);
        let snapshot = state.snapshot.as_ref().unwrap();
        assert_eq!(snapshot.state.current_pick_idx, 3);
        assert!(!snapshot.players.iter().any(|p| p.name == "Pedro"));
        assert!(alerts(&drain(&mut ui_rx)).is_empty());
    }

    #[tokio::test]
    async fn rejected_pick_surfaces_backend_detail() {
        let backend = ScriptedBackend {
            reject_pick: Some("Player already drafted".into()),
            ..ScriptedBackend::configured(two_team_state(), market())
        };
        let (backend, mut state, ui_tx, mut ui_rx) = setup(backend);
        state.startup(&ui_tx).await;
        drain(&mut ui_rx);

        handle_user_command(
            &mut state,
            UserCommand::DraftPlayer {
                player_name: "Pedro".into(),
            },
            &ui_tx,
        )
        .await;

        // No resync after a rejected write
        assert_eq!(backend.calls().last().map(String::as_str), Some("pick 0 Pedro"));
        assert_eq!(
            alerts(&drain(&mut ui_rx)),
            vec!["Could not draft player: Player already drafted".to_string()]
        );
    }

    #[tokio::test]
    async fn pick_refused_locally_when_finished() {
        let mut finished = two_team_state();
        finished.current_pick_idx = 4;
        finished.is_finished = true;
        let (backend, mut state, ui_tx, mut ui_rx) =
            setup(ScriptedBackend::configured(finished, market()));
        state.startup(&ui_tx).await;
        drain(&mut ui_rx);

        handle_user_command(
            &mut state,
            UserCommand::DraftPlayer {
                player_name: "Pedro".into(),
            },
            &ui_tx,
        )
        .await;

        assert!(!backend.calls().iter().any(|c| c.starts_with("pick")));
        assert!(alerts(&drain(&mut ui_rx))[0].contains("already finished"));
    }

    #[tokio::test]
    async fn stalled_pick_is_logged_not_alerted() {
        let backend = ScriptedBackend {
            stall_pick: true,
            ..ScriptedBackend::configured(two_team_state(), market())
        };
        let (_backend, mut state, ui_tx, mut ui_rx) = setup(backend);
        state.startup(&ui_tx).await;
        drain(&mut ui_rx);

        state.draft_player("Pedro").await.unwrap();
        assert_eq!(state.snapshot.as_ref().unwrap().state.current_pick_idx, 0);
    }

    // -----------------------------------------------------------------------
    // Tests: undo / reset / export
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn undo_without_picks_is_a_no_op() {
        let (backend, mut state, ui_tx, _ui_rx) =
            setup(ScriptedBackend::configured(two_team_state(), market()));
        state.startup(&ui_tx).await;
        handle_user_command(&mut state, UserCommand::Undo, &ui_tx).await;
        assert!(!backend.calls().contains(&"undo".to_string()));
    }

    #[tokio::test]
    async fn undo_reverts_last_pick() {
        let (backend, mut state, ui_tx, _ui_rx) =
            setup(ScriptedBackend::configured(two_team_state(), market()));
        state.startup(&ui_tx).await;
        state.draft_player("Pedro").await.unwrap();
        handle_user_command(&mut state, UserCommand::Undo, &ui_tx).await;

        assert!(backend.calls().contains(&"undo".to_string()));
        let snapshot = state.snapshot.as_ref().unwrap();
        assert_eq!(snapshot.state.current_pick_idx, 0);
        assert!(snapshot.players.iter().any(|p| p.name == "Pedro"));
    }

    #[tokio::test]
    async fn reset_discards_state_and_reprobes() {
        let (backend, mut state, ui_tx, mut ui_rx) =
            setup(ScriptedBackend::configured(two_team_state(), market()));
        state.startup(&ui_tx).await;
        drain(&mut ui_rx);

        handle_user_command(&mut state, UserCommand::Reset, &ui_tx).await;

        assert!(state.snapshot.is_none());
        assert_eq!(state.phase, Phase::Unconfigured);
        let calls = backend.calls();
        assert_eq!(&calls[3..], &["reset", "root"]);
        let updates = drain(&mut ui_rx);
        assert!(updates.contains(&UiUpdate::Phase(Phase::Unconfigured)));
    }

    #[tokio::test]
    async fn export_reports_saved_path() {
        let (_backend, mut state, ui_tx, mut ui_rx) =
            setup(ScriptedBackend::configured(two_team_state(), market()));
        handle_user_command(&mut state, UserCommand::Export, &ui_tx).await;

        let saved = drain(&mut ui_rx).into_iter().find_map(|u| match u {
            UiUpdate::ExportSaved { path, url } => Some((path, url)),
            _ => None,
        });
        let (path, url) = saved.expect("export should be reported");
        assert!(path.exists());
        assert_eq!(url, "http://localhost:8000/api/export");
        let _ = std::fs::remove_file(path);
    }

    // -----------------------------------------------------------------------
    // Tests: loop
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn run_exits_on_quit() {
        let backend: Arc<dyn DraftBackend> = Arc::new(ScriptedBackend::unconfigured());
        let state = AppState::new(backend, std::env::temp_dir());
        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (ui_tx, _ui_rx) = mpsc::channel(16);

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        run(cmd_rx, ui_tx, state).await.unwrap();
    }

    #[test]
    fn alert_text_prefers_backend_message() {
        let err = anyhow::Error::new(ApiError::Rejected {
            endpoint: "/api/undo".into(),
            status: 400,
            message: "No picks to undo".into(),
        });
        assert_eq!(alert_text("Could not undo pick", &err), "Could not undo pick: No picks to undo");

        let err = anyhow::anyhow!("the draft is already finished");
        assert_eq!(
            alert_text("Could not draft player", &err),
            "Could not draft player: the draft is already finished"
        );
    }
}
