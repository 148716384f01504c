// Draft backend API: request/response contracts and the backend trait.
//
// The backend owns the draft. Every operation here is a single round trip
// with no retry, caching or schema validation beyond JSON decoding.

pub mod client;

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::draft::player::Player;
use crate::draft::state::DraftState;

pub use client::{Endpoints, HttpBackend};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} rejected the request: {message}")]
    Rejected {
        endpoint: String,
        status: u16,
        /// The backend's `detail` text, or `HTTP <status>` when absent.
        message: String,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Short text suitable for an alert box.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Transport { .. } => "Could not reach the draft server".to_string(),
            ApiError::Decode { .. } => "Unexpected response from the draft server".to_string(),
            ApiError::Io { path, .. } => format!("Could not write {path}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Root probe response (`GET /`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetupStatus {
    /// Whether a draft is configured on the backend.
    #[serde(default)]
    pub setup: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// One team entry of the setup request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSetup {
    pub name: String,
    /// Data URI, or `""` for no logo.
    #[serde(default)]
    pub logo: String,
}

/// Body of `POST /api/setup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupRequest {
    pub league_name: String,
    pub teams: Vec<TeamSetup>,
    pub n_rounds: u32,
    /// Always `false`: the draft follows the order the teams were entered.
    pub random_order: bool,
}

impl SetupRequest {
    pub fn new(league_name: &str, teams: &[TeamSetup], n_rounds: u32) -> Self {
        SetupRequest {
            league_name: league_name.to_string(),
            teams: teams.to_vec(),
            n_rounds,
            random_order: false,
        }
    }
}

/// Body of `POST /api/pick`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickRequest {
    pub team_idx: usize,
    pub player_name: String,
}

// ---------------------------------------------------------------------------
// DraftBackend
// ---------------------------------------------------------------------------

/// The operations the client performs against the draft backend.
///
/// Pick, undo and export downloads fail on non-2xx responses. The other
/// calls assume success and only fail on transport or decoding errors.
#[async_trait]
pub trait DraftBackend: Send + Sync {
    /// `GET /`: is a draft configured?
    async fn get_setup_state(&self) -> Result<SetupStatus, ApiError>;

    /// `POST /api/setup`.
    async fn setup_draft(
        &self,
        league_name: &str,
        teams: &[TeamSetup],
        n_rounds: u32,
    ) -> Result<Value, ApiError>;

    /// `GET /api/state`.
    async fn get_state(&self) -> Result<DraftState, ApiError>;

    /// `GET /api/players`: the undrafted market.
    async fn get_players(&self) -> Result<Vec<Player>, ApiError>;

    /// `POST /api/pick`.
    async fn make_pick(&self, team_idx: usize, player_name: &str) -> Result<Value, ApiError>;

    /// `POST /api/reset`.
    async fn reset_draft(&self) -> Result<Value, ApiError>;

    /// `POST /api/undo`.
    async fn undo_pick(&self) -> Result<Value, ApiError>;

    /// URL of the CSV export (`GET /api/export`).
    fn export_url(&self) -> String;

    /// Download the CSV export into `dest`, returning the number of bytes
    /// written.
    async fn download_export(&self, dest: &Path) -> Result<u64, ApiError>;
}
