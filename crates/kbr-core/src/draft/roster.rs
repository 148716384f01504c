// Roster aggregates: position counts, squad value, and pitch lines.

use super::player::{Player, Position};

/// Per-position head count for a roster.
///
/// `other` collects players whose position is not one of the four known
/// ones, so the counts always add up to the roster size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionCounts {
    pub gol: usize,
    pub def: usize,
    pub mei: usize,
    pub ata: usize,
    pub other: usize,
}

impl PositionCounts {
    pub fn from_players(players: &[Player]) -> Self {
        let mut counts = PositionCounts::default();
        for p in players {
            match p.position {
                Position::Goalkeeper => counts.gol += 1,
                Position::Defender => counts.def += 1,
                Position::Midfielder => counts.mei += 1,
                Position::Forward => counts.ata += 1,
                Position::Other(_) => counts.other += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.gol + self.def + self.mei + self.ata + self.other
    }

    pub fn for_position(&self, position: &Position) -> usize {
        match position {
            Position::Goalkeeper => self.gol,
            Position::Defender => self.def,
            Position::Midfielder => self.mei,
            Position::Forward => self.ata,
            Position::Other(_) => self.other,
        }
    }
}

/// Sum of market values across a roster.
pub fn roster_value(players: &[Player]) -> f64 {
    players.iter().map(|p| p.market_value).sum()
}

/// A roster split into pitch lines, attack first.
#[derive(Debug, Clone, Default)]
pub struct PitchLines<'a> {
    pub forwards: Vec<&'a Player>,
    pub midfielders: Vec<&'a Player>,
    pub defenders: Vec<&'a Player>,
    pub goalkeepers: Vec<&'a Player>,
}

impl<'a> PitchLines<'a> {
    /// Group players by line, keeping pick order within each line.
    /// Players with an unknown position are not placed on the pitch.
    pub fn from_players(players: &'a [Player]) -> Self {
        let mut lines = PitchLines::default();
        for p in players {
            match p.position {
                Position::Forward => lines.forwards.push(p),
                Position::Midfielder => lines.midfielders.push(p),
                Position::Defender => lines.defenders.push(p),
                Position::Goalkeeper => lines.goalkeepers.push(p),
                Position::Other(_) => {}
            }
        }
        lines
    }

    /// Lines from the top of the pitch (attack) to the bottom (goal).
    pub fn top_to_bottom(&self) -> [(Position, &[&'a Player]); 4] {
        [
            (Position::Forward, self.forwards.as_slice()),
            (Position::Midfielder, self.midfielders.as_slice()),
            (Position::Defender, self.defenders.as_slice()),
            (Position::Goalkeeper, self.goalkeepers.as_slice()),
        ]
    }
}
