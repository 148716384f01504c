// Draft board: a round x team grid built from pick history.

use std::collections::HashMap;

use super::player::Player;
use super::state::{DraftState, Team};

/// One cell of the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardCell<'a> {
    /// The player picked by this team in this round, if any.
    pub player: Option<&'a Player>,
    /// Whether this is the slot currently on the clock.
    pub on_the_clock: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardRow<'a> {
    /// 1-based round number.
    pub round: u32,
    /// One cell per team, in `DraftBoard::teams` order.
    pub cells: Vec<BoardCell<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftBoard<'a> {
    pub teams: &'a [Team],
    pub rows: Vec<BoardRow<'a>>,
}

impl<'a> DraftBoard<'a> {
    /// Build the board for a state snapshot.
    ///
    /// Rows are `1..=ceil(total_picks / teams)`. Cells are keyed by
    /// `(team id, round)`; with duplicate keys in history the later pick wins.
    pub fn build(state: &'a DraftState) -> Self {
        let mut picks: HashMap<(usize, u32), &'a Player> = HashMap::new();
        for h in &state.history {
            picks.insert((h.team_idx, h.round), &h.player);
        }

        let clock = state.current_slot();

        let rows = (1..=state.board_rounds())
            .map(|round| BoardRow {
                round,
                cells: state
                    .teams
                    .iter()
                    .map(|team| BoardCell {
                        player: picks.get(&(team.id, round)).copied(),
                        on_the_clock: clock
                            .is_some_and(|slot| slot.team_idx == team.id && slot.round == round),
                    })
                    .collect(),
            })
            .collect();

        DraftBoard {
            teams: &state.teams,
            rows,
        }
    }

    pub fn cell(&self, round: u32, team_pos: usize) -> Option<&BoardCell<'a>> {
        self.rows
            .get((round as usize).checked_sub(1)?)
            .and_then(|row| row.cells.get(team_pos))
    }

    /// Number of filled cells.
    pub fn filled(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.player.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::player::Position;
    use crate::draft::state::fixtures::{apply_pick, player, snake_state};

    #[test]
    fn every_pick_lands_in_its_cell_exactly_once() {
        let mut state = snake_state(3, 2);
        let names = ["A", "B", "C", "D"];
        for n in names {
            apply_pick(&mut state, player(n, Position::Midfielder, 1.0));
        }
        let board = DraftBoard::build(&state);
        assert_eq!(board.rows.len(), 2);
        assert_eq!(board.filled(), names.len());

        // Round 1: teams 0,1,2 picked A,B,C. Round 2 starts with team 2 (D).
        assert_eq!(board.cell(1, 0).unwrap().player.unwrap().name, "A");
        assert_eq!(board.cell(1, 2).unwrap().player.unwrap().name, "C");
        assert_eq!(board.cell(2, 2).unwrap().player.unwrap().name, "D");

        for n in names {
            let hits = board
                .rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .filter(|c| c.player.is_some_and(|p| p.name == n))
                .count();
            assert_eq!(hits, 1, "{n} should appear once");
        }
    }

    #[test]
    fn missing_picks_render_as_empty_cells() {
        let state = snake_state(2, 2);
        let board = DraftBoard::build(&state);
        assert_eq!(board.filled(), 0);
        assert!(board.cell(2, 1).unwrap().player.is_none());
    }

    #[test]
    fn on_the_clock_cell_is_marked() {
        let mut state = snake_state(2, 2);
        apply_pick(&mut state, player("A", Position::Forward, 1.0));
        let board = DraftBoard::build(&state);
        assert!(board.cell(1, 1).unwrap().on_the_clock);
        let marked = board
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.on_the_clock)
            .count();
        assert_eq!(marked, 1);
    }

    #[test]
    fn finished_board_has_no_clock() {
        let mut state = snake_state(1, 1);
        apply_pick(&mut state, player("A", Position::Forward, 1.0));
        let board = DraftBoard::build(&state);
        assert!(!board.cell(1, 0).unwrap().on_the_clock);
    }

    #[test]
    fn out_of_range_cells_are_none() {
        let state = snake_state(2, 1);
        let board = DraftBoard::build(&state);
        assert!(board.cell(0, 0).is_none());
        assert!(board.cell(2, 0).is_none());
        assert!(board.cell(1, 5).is_none());
    }
}
