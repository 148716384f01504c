// Market (available players) filtering and ordering.
//
// Pure and synchronous: recomputed from the current filters on every render.

use std::collections::BTreeSet;

use crate::draft::player::{Player, Position};

/// Maximum number of market rows rendered at once.
pub const MARKET_DISPLAY_CAP: usize = 100;

/// Active market filters. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketFilter {
    /// Case-insensitive substring of the player's name.
    pub search: String,
    pub position: Option<Position>,
    pub club: Option<String>,
}

impl MarketFilter {
    pub fn matches(&self, player: &Player) -> bool {
        let needle = self.search.to_lowercase();
        self.matches_with_needle(player, &needle)
    }

    fn matches_with_needle(&self, player: &Player, needle: &str) -> bool {
        if !needle.is_empty() && !player.name.to_lowercase().contains(needle) {
            return false;
        }
        if let Some(ref pos) = self.position {
            if player.position != *pos {
                return false;
            }
        }
        if let Some(ref club) = self.club {
            if player.club != *club {
                return false;
            }
        }
        true
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.position.is_some() || self.club.is_some()
    }

    /// Advance the position filter: All -> Forward -> Midfielder -> Defender
    /// -> Goalkeeper -> All.
    pub fn cycle_position(&mut self) {
        self.position = match &self.position {
            None => Some(Position::ALL[0].clone()),
            Some(current) => match Position::ALL.iter().position(|p| p == current) {
                Some(i) if i + 1 < Position::ALL.len() => Some(Position::ALL[i + 1].clone()),
                _ => None,
            },
        };
    }

    /// Advance the club filter through `options` (as returned by
    /// [`club_options`]), wrapping back to All after the last club.
    pub fn cycle_club(&mut self, options: &[String]) {
        self.club = match &self.club {
            None => options.first().cloned(),
            Some(current) => match options.iter().position(|c| c == current) {
                Some(i) => options.get(i + 1).cloned(),
                None => None,
            },
        };
    }

    pub fn clear(&mut self) {
        *self = MarketFilter::default();
    }
}

/// The filtered, ordered market.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketView<'a> {
    /// Number of players matching the filters, before the display cap.
    pub total_matches: usize,
    /// The first [`MARKET_DISPLAY_CAP`] matches, highest market value first.
    pub shown: Vec<&'a Player>,
}

/// Apply the filters, sort by market value (descending) and cap the result.
///
/// The sort is stable and has no secondary key, so players with equal value
/// keep their relative input order.
pub fn filter_market<'a>(players: &'a [Player], filter: &MarketFilter) -> MarketView<'a> {
    let needle = filter.search.to_lowercase();
    let mut matched: Vec<&Player> = players
        .iter()
        .filter(|p| filter.matches_with_needle(p, &needle))
        .collect();

    matched.sort_by(|a, b| b.market_value.total_cmp(&a.market_value));

    let total_matches = matched.len();
    matched.truncate(MARKET_DISPLAY_CAP);

    MarketView {
        total_matches,
        shown: matched,
    }
}

/// Distinct clubs in the market, sorted, for the club filter.
pub fn club_options(players: &[Player]) -> Vec<String> {
    players
        .iter()
        .map(|p| p.club.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
