// Draft state snapshot as returned by `/api/state`.
//
// The backend owns this state; the client only reads it. Every refresh
// replaces the whole snapshot.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// A drafting team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Stable identifier (equal to the team's index in `DraftState::teams`).
    pub id: usize,
    /// Display name.
    pub name: String,
    /// Logo as a data URI. The backend sends `""` when none was uploaded.
    #[serde(default)]
    pub logo: Option<String>,
    /// Drafted roster in pick order.
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Team {
    pub fn has_logo(&self) -> bool {
        self.logo.as_deref().is_some_and(|l| !l.trim().is_empty())
    }
}

/// One completed pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickHistory {
    pub round: u32,
    /// 1-based overall pick number.
    pub pick_overall: usize,
    pub team_idx: usize,
    pub player: Player,
}

/// One entry of the precomputed draft order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSlot {
    pub team_idx: usize,
    pub round: u32,
}

/// The complete draft state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftState {
    pub league_name: String,
    pub teams: Vec<Team>,
    /// Index into `draft_order` of the pick being made.
    pub current_pick_idx: usize,
    pub total_picks: usize,
    pub draft_order: Vec<DraftSlot>,
    pub history: Vec<PickHistory>,
    pub is_finished: bool,
}

impl DraftState {
    /// The draft-order slot on the clock, or `None` once the draft is over.
    pub fn current_slot(&self) -> Option<DraftSlot> {
        if self.is_finished {
            return None;
        }
        self.draft_order.get(self.current_pick_idx).copied()
    }

    /// The team on the clock.
    pub fn active_team(&self) -> Option<&Team> {
        self.current_slot().and_then(|slot| self.teams.get(slot.team_idx))
    }

    pub fn current_round(&self) -> Option<u32> {
        self.current_slot().map(|slot| slot.round)
    }

    /// 1-based number of the pick on the clock.
    pub fn pick_number(&self) -> usize {
        self.current_pick_idx + 1
    }

    /// Undo is only offered once at least one pick was made.
    pub fn can_undo(&self) -> bool {
        self.current_pick_idx > 0
    }

    pub fn team(&self, idx: usize) -> Option<&Team> {
        self.teams.get(idx)
    }

    /// Whether the draft order length matches `total_picks`.
    pub fn order_is_consistent(&self) -> bool {
        self.draft_order.len() == self.total_picks
    }

    /// Whether this snapshot is exactly one pick past `previous_pick_idx`.
    ///
    /// A successful pick must advance the index by one; anything else is a
    /// backend contract violation.
    pub fn advanced_from(&self, previous_pick_idx: usize) -> bool {
        self.current_pick_idx == previous_pick_idx + 1
    }

    /// Number of board rounds: `ceil(total_picks / teams)`.
    pub fn board_rounds(&self) -> u32 {
        if self.teams.is_empty() {
            return 0;
        }
        self.total_picks.div_ceil(self.teams.len()) as u32
    }
}

/// Whether `after` (the resync following a pick) is exactly one pick past
/// `before`.
pub fn check_pick_advanced(before: &DraftState, after: &DraftState) -> bool {
    after.advanced_from(before.current_pick_idx)
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::draft::player::Position;

    /// A snake-order state with `n_teams` empty teams and `n_rounds` rounds.
    pub fn snake_state(n_teams: usize, n_rounds: u32) -> DraftState {
        let teams = (0..n_teams)
            .map(|i| Team {
                id: i,
                name: format!("Time {}", i + 1),
                logo: Some(String::new()),
                players: Vec::new(),
            })
            .collect();
        let mut draft_order = Vec::new();
        for r in 0..n_rounds {
            let mut order: Vec<usize> = (0..n_teams).collect();
            if r % 2 == 1 {
                order.reverse();
            }
            draft_order.extend(order.into_iter().map(|team_idx| DraftSlot {
                team_idx,
                round: r + 1,
            }));
        }
        DraftState {
            league_name: "Liga Teste".into(),
            teams,
            current_pick_idx: 0,
            total_picks: draft_order.len(),
            draft_order,
            history: Vec::new(),
            is_finished: false,
        }
    }

    /// Apply a pick the way the backend does, for building fixtures.
    pub fn apply_pick(state: &mut DraftState, player: Player) {
        let slot = state.draft_order[state.current_pick_idx];
        state.teams[slot.team_idx].players.push(player.clone());
        state.history.push(PickHistory {
            round: slot.round,
            pick_overall: state.current_pick_idx + 1,
            team_idx: slot.team_idx,
            player,
        });
        state.current_pick_idx += 1;
        state.is_finished = state.current_pick_idx >= state.draft_order.len();
    }

    pub fn player(name: &str, position: Position, value: f64) -> Player {
        Player::new(name, position, "Clube", value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
