// HTTP implementation of `DraftBackend` using reqwest.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use super::{ApiError, DraftBackend, PickRequest, SetupRequest, SetupStatus, TeamSetup};
use crate::config::ApiConfig;
use crate::draft::player::Player;
use crate::draft::state::DraftState;

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Resolved backend URLs.
///
/// The API base (e.g. `http://localhost:8000/api`) serves the draft routes;
/// the root probe lives at the base with `/api` removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api: String,
    root: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        let api = base_url.trim_end_matches('/').to_string();
        let mut root = api.replacen("/api", "", 1);
        if !root.ends_with('/') {
            root.push('/');
        }
        Endpoints { api, root }
    }

    /// Root URL used for the setup probe.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// URL of an API route, e.g. `route("state")`.
    pub fn route(&self, path: &str) -> String {
        format!("{}/{}", self.api, path.trim_start_matches('/'))
    }
}

// ---------------------------------------------------------------------------
// HttpBackend
// ---------------------------------------------------------------------------

pub struct HttpBackend {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(base_url: &str, connect_timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(concat!("kbr-draft/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(HttpBackend {
            http,
            endpoints: Endpoints::new(base_url),
        })
    }

    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        debug!(endpoint, "sending request");
        request.send().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: &str) -> Result<T, ApiError> {
        let response = self.send(endpoint, self.http.get(url)).await?;
        decode(endpoint, response).await
    }
}

#[async_trait]
impl DraftBackend for HttpBackend {
    async fn get_setup_state(&self) -> Result<SetupStatus, ApiError> {
        let root = self.endpoints.root().to_string();
        self.get_json("/", &root).await
    }

    async fn setup_draft(
        &self,
        league_name: &str,
        teams: &[TeamSetup],
        n_rounds: u32,
    ) -> Result<Value, ApiError> {
        let body = SetupRequest::new(league_name, teams, n_rounds);
        info!(
            "Creating league '{}' with {} teams, {} rounds",
            league_name,
            teams.len(),
            n_rounds
        );
        let request = self.http.post(self.endpoints.route("setup")).json(&body);
        let response = self.send("/api/setup", request).await?;
        decode("/api/setup", response).await
    }

    async fn get_state(&self) -> Result<DraftState, ApiError> {
        self.get_json("/api/state", &self.endpoints.route("state")).await
    }

    async fn get_players(&self) -> Result<Vec<Player>, ApiError> {
        self.get_json("/api/players", &self.endpoints.route("players"))
            .await
    }

    async fn make_pick(&self, team_idx: usize, player_name: &str) -> Result<Value, ApiError> {
        let body = PickRequest {
            team_idx,
            player_name: player_name.to_string(),
        };
        let request = self.http.post(self.endpoints.route("pick")).json(&body);
        let response = self.send("/api/pick", request).await?;
        let response = ensure_success("/api/pick", response).await?;
        decode("/api/pick", response).await
    }

    async fn reset_draft(&self) -> Result<Value, ApiError> {
        let request = self.http.post(self.endpoints.route("reset"));
        let response = self.send("/api/reset", request).await?;
        decode("/api/reset", response).await
    }

    async fn undo_pick(&self) -> Result<Value, ApiError> {
        let request = self.http.post(self.endpoints.route("undo"));
        let response = self.send("/api/undo", request).await?;
        let response = ensure_success("/api/undo", response).await?;
        decode("/api/undo", response).await
    }

    fn export_url(&self) -> String {
        self.endpoints.route("export")
    }

    async fn download_export(&self, dest: &Path) -> Result<u64, ApiError> {
        let endpoint = "/api/export";
        let response = self.send(endpoint, self.http.get(self.export_url())).await?;
        let response = ensure_success(endpoint, response).await?;

        match write_body(endpoint, response, dest).await {
            Ok(written) => {
                info!("Saved export ({} bytes) to {}", written, dest.display());
                Ok(written)
            }
            Err(e) => {
                // A partial CSV must not be left behind.
                if let Err(rm) = tokio::fs::remove_file(dest).await {
                    if rm.kind() != std::io::ErrorKind::NotFound {
                        warn!("Could not remove partial export {}: {}", dest.display(), rm);
                    }
                }
                Err(e)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Stream the response body into a new file at `dest`.
async fn write_body(endpoint: &str, response: Response, dest: &Path) -> Result<u64, ApiError> {
    let io_err = |source| ApiError::Io {
        path: dest.display().to_string(),
        source,
    };
    let mut file = tokio::fs::File::create(dest).await.map_err(io_err)?;
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        file.write_all(&chunk).await.map_err(io_err)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_err)?;
    Ok(written)
}

/// Turn a non-2xx response into `ApiError::Rejected`.
async fn ensure_success(endpoint: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = rejection_message(status.as_u16(), &body);
    warn!(endpoint, status = status.as_u16(), "request rejected: {}", message);
    Err(ApiError::Rejected {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message,
    })
}

/// Extract the backend's `{"detail": ...}` text, falling back to `HTTP <status>`.
pub(crate) fn rejection_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string(),
            _ => format!("HTTP {status}"),
        },
        _ => format!("HTTP {status}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
