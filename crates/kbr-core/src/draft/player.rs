// Player records from the market list and drafted rosters.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Field position of a player as reported by the backend (`Posição`).
///
/// The four football positions are recognised; anything else is kept
/// verbatim in `Other` so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Position {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
    Other(String),
}

impl Position {
    /// The four known positions, in the order the market filter cycles them.
    pub const ALL: [Position; 4] = [
        Position::Forward,
        Position::Midfielder,
        Position::Defender,
        Position::Goalkeeper,
    ];

    /// Parse the backend's position string. Matching is exact, like the
    /// backend's own comparisons.
    pub fn from_backend(s: &str) -> Self {
        match s {
            "Forward" => Position::Forward,
            "Midfielder" => Position::Midfielder,
            "Defender" => Position::Defender,
            "Goalkeeper" => Position::Goalkeeper,
            other => Position::Other(other.to_string()),
        }
    }

    /// The string the backend uses for this position.
    pub fn as_str(&self) -> &str {
        match self {
            Position::Forward => "Forward",
            Position::Midfielder => "Midfielder",
            Position::Defender => "Defender",
            Position::Goalkeeper => "Goalkeeper",
            Position::Other(s) => s.as_str(),
        }
    }

    /// Short badge label: ATA, MEI, DEF, GOL, or the first three characters
    /// upper-cased for unknown positions.
    pub fn acronym(&self) -> String {
        match self {
            Position::Forward => "ATA".to_string(),
            Position::Midfielder => "MEI".to_string(),
            Position::Defender => "DEF".to_string(),
            Position::Goalkeeper => "GOL".to_string(),
            Position::Other(s) => s.chars().take(3).collect::<String>().to_uppercase(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Position::Other(_))
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::Other(String::new())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The backend fills missing cells with "", and older exports may
        // carry nulls; neither should reject the whole player list.
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Position::from_backend(&s)),
            _ => Ok(Position::default()),
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player row as served by `/api/players` and embedded in rosters and
/// pick history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Player name (`Nome`). Unique within a market list.
    #[serde(rename = "Nome")]
    pub name: String,
    /// Field position (`Posição`).
    #[serde(rename = "Posição", default)]
    pub position: Position,
    /// Real-world club (`Team`).
    #[serde(rename = "Team", default)]
    pub club: String,
    /// Market value in millions (`Valor de Mercado`).
    #[serde(
        rename = "Valor de Mercado",
        default,
        deserialize_with = "lenient_market_value"
    )]
    pub market_value: f64,
    /// Every other column the backend sends along.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Player {
    /// Build a player with no extra columns.
    pub fn new(name: &str, position: Position, club: &str, market_value: f64) -> Self {
        Player {
            name: name.to_string(),
            position,
            club: club.to_string(),
            market_value,
            extra: Map::new(),
        }
    }

    /// Shirt number (`Número`), when the backend provides a non-empty one.
    pub fn shirt_number(&self) -> Option<String> {
        match self.extra.get("Número")? {
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.fract() == 0.0 => Some(format!("{}", f as i64)),
                _ => Some(n.to_string()),
            },
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }
}

/// Format a market value the way the cards display it: `€12.5M`.
pub fn format_market_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("€{}M", value as i64)
    } else {
        format!("€{}M", value)
    }
}

/// Accept numbers, numeric strings (with `.` or `,` decimals) and treat
/// anything else (the backend's `""` filler, null) as zero.
fn lenient_market_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let value = match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if value.is_finite() { value } else { 0.0 })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
