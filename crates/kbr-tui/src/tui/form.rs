// Setup form state: league name, team/round counts and per-team entries.

use kbr_core::config::{SetupDefaults, MAX_ROUNDS, MAX_TEAMS, MIN_ROUNDS, MIN_TEAMS};

use crate::protocol::{SetupTeamInput, UserCommand};

/// Field under the cursor. Team fields carry the team index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    LeagueName,
    TeamCount,
    RoundCount,
    TeamName(usize),
    TeamLogo(usize),
}

/// Fields before the per-team rows.
const HEADER_FIELDS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct SetupForm {
    pub league_name: String,
    pub n_rounds: u32,
    pub teams: Vec<SetupTeamInput>,
    /// Index into the flattened field list (see [`SetupForm::field_at`]).
    pub focus: usize,
    /// Digit just typed on a count field, as `(focus, digit)`. The next
    /// digit on the same field combines with it into a two-digit count.
    pending_digit: Option<(usize, u32)>,
}

fn default_team(idx: usize) -> SetupTeamInput {
    SetupTeamInput {
        name: format!("Time {}", idx + 1),
        logo_path: String::new(),
    }
}

impl SetupForm {
    pub fn from_defaults(defaults: &SetupDefaults) -> Self {
        let n_teams = defaults.teams.clamp(MIN_TEAMS, MAX_TEAMS);
        SetupForm {
            league_name: defaults.league_name.clone(),
            n_rounds: defaults.rounds.clamp(MIN_ROUNDS, MAX_ROUNDS),
            teams: (0..n_teams).map(default_team).collect(),
            focus: 0,
            pending_digit: None,
        }
    }

    pub fn n_teams(&self) -> usize {
        self.teams.len()
    }

    /// Grow with `Time {i}` defaults or truncate, keeping existing entries.
    pub fn set_team_count(&mut self, n: usize) {
        let n = n.clamp(MIN_TEAMS, MAX_TEAMS);
        if n > self.teams.len() {
            let start = self.teams.len();
            self.teams.extend((start..n).map(default_team));
        } else {
            self.teams.truncate(n);
        }
        self.focus = self.focus.min(self.field_count() - 1);
    }

    pub fn set_rounds(&mut self, n: u32) {
        self.n_rounds = n.clamp(MIN_ROUNDS, MAX_ROUNDS);
    }

    // -- Focus --

    pub fn field_count(&self) -> usize {
        HEADER_FIELDS + 2 * self.teams.len()
    }

    pub fn field_at(&self, idx: usize) -> SetupField {
        match idx {
            0 => SetupField::LeagueName,
            1 => SetupField::TeamCount,
            2 => SetupField::RoundCount,
            n => {
                let team = (n - HEADER_FIELDS) / 2;
                if (n - HEADER_FIELDS) % 2 == 0 {
                    SetupField::TeamName(team)
                } else {
                    SetupField::TeamLogo(team)
                }
            }
        }
    }

    pub fn focused(&self) -> SetupField {
        self.field_at(self.focus)
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.field_count();
    }

    pub fn focus_prev(&mut self) {
        let count = self.field_count();
        self.focus = (self.focus + count - 1) % count;
    }

    // -- Editing --

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focused() {
            SetupField::LeagueName => Some(&mut self.league_name),
            SetupField::TeamName(i) => self.teams.get_mut(i).map(|t| &mut t.name),
            SetupField::TeamLogo(i) => self.teams.get_mut(i).map(|t| &mut t.logo_path),
            SetupField::TeamCount | SetupField::RoundCount => None,
        }
    }

    /// Combine `d` with the digit typed just before it on the focused
    /// field. Returns the count to apply; a value over `max` starts a new
    /// entry with `d` alone.
    fn count_entry(&mut self, d: u32, max: u32) -> u32 {
        let focus = self.focus;
        match self.pending_digit.take() {
            Some((f, first)) if f == focus && first * 10 + d <= max => first * 10 + d,
            _ => {
                self.pending_digit = Some((focus, d));
                d
            }
        }
    }

    /// Type a character. Two digits in a row on a count field form a
    /// two-digit count; other characters on count fields are ignored.
    pub fn input_char(&mut self, c: char) {
        match self.focused() {
            SetupField::TeamCount => {
                if let Some(d) = c.to_digit(10) {
                    let n = self.count_entry(d, MAX_TEAMS as u32);
                    self.set_team_count(n as usize);
                }
            }
            SetupField::RoundCount => {
                if let Some(d) = c.to_digit(10) {
                    let n = self.count_entry(d, MAX_ROUNDS);
                    self.set_rounds(n);
                }
            }
            _ => {
                if let Some(text) = self.focused_text() {
                    text.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        self.pending_digit = None;
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Step the focused count field up or down.
    pub fn adjust(&mut self, delta: i32) {
        self.pending_digit = None;
        match self.focused() {
            SetupField::TeamCount => {
                let n = self.n_teams() as i64 + delta as i64;
                self.set_team_count(n.max(0) as usize);
            }
            SetupField::RoundCount => {
                let n = self.n_rounds as i64 + delta as i64;
                self.set_rounds(n.max(0) as u32);
            }
            _ => {}
        }
    }

    /// Build the setup command, or the alert text when a team name is blank.
    pub fn submit(&self) -> Result<UserCommand, String> {
        if self.teams.iter().any(|t| t.name.trim().is_empty()) {
            return Err("Fill in the name of every team!".to_string());
        }
        Ok(UserCommand::SubmitSetup {
            league_name: self.league_name.clone(),
            teams: self.teams.clone(),
            n_rounds: self.n_rounds,
        })
    }
}

impl Default for SetupForm {
    fn default() -> Self {
        SetupForm::from_defaults(&SetupDefaults::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
