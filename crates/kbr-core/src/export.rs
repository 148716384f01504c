// CSV export download: saves the backend's draft results into the export
// directory under a timestamped name.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::api::{ApiError, DraftBackend};

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedExport {
    pub path: PathBuf,
    pub bytes: u64,
    /// The backend URL the CSV was fetched from.
    pub url: String,
}

/// `draft_results_YYYYMMDD_HHMMSS.csv`
pub fn export_file_name(at: DateTime<Local>) -> String {
    format!("draft_results_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Download the CSV export into `dir`, creating it if needed.
pub async fn save_export(backend: &dyn DraftBackend, dir: &Path) -> Result<SavedExport, ApiError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ApiError::Io {
            path: dir.display().to_string(),
            source,
        })?;

    let path = dir.join(export_file_name(Local::now()));
    let url = backend.export_url();
    let bytes = backend.download_export(&path).await?;
    info!("Export from {} written to {}", url, path.display());

    Ok(SavedExport { path, bytes, url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SetupStatus, TeamSetup};
    use crate::draft::player::Player;
    use crate::draft::state::DraftState;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::Value;

    const CSV: &str = "player_id,Time Escolhido,Nome,Posição,Valor\n1,Time 1,Pedro,Forward,20\n";

    /// Only the export half of the trait matters here.
    struct CsvBackend;

    #[async_trait]
    impl DraftBackend for CsvBackend {
        async fn get_setup_state(&self) -> Result<SetupStatus, ApiError> {
            Ok(SetupStatus::default())
        }
        async fn setup_draft(&self, _: &str, _: &[TeamSetup], _: u32) -> Result<Value, ApiError> {
            Ok(Value::Null)
        }
        async fn get_state(&self) -> Result<DraftState, ApiError> {
            Ok(DraftState::default())
        }
        async fn get_players(&self) -> Result<Vec<Player>, ApiError> {
            Ok(Vec::new())
        }
        async fn make_pick(&self, _: usize, _: &str) -> Result<Value, ApiError> {
            Ok(Value::Null)
        }
        async fn reset_draft(&self) -> Result<Value, ApiError> {
            Ok(Value::Null)
        }
        async fn undo_pick(&self) -> Result<Value, ApiError> {
            Ok(Value::Null)
        }
        fn export_url(&self) -> String {
            "http://localhost:8000/api/export".into()
        }
        async fn download_export(&self, dest: &Path) -> Result<u64, ApiError> {
            std::fs::write(dest, CSV).map_err(|source| ApiError::Io {
                path: dest.display().to_string(),
                source,
            })?;
            Ok(CSV.len() as u64)
        }
    }

    #[test]
    fn file_name_is_timestamped() {
        let at = Local.with_ymd_and_hms(2025, 5, 4, 13, 7, 9).unwrap();
        assert_eq!(export_file_name(at), "draft_results_20250504_130709.csv");
    }

    #[tokio::test]
    async fn saves_into_created_directory() {
        let dir = std::env::temp_dir().join("kbr_export_test").join("nested");
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());

        let saved = save_export(&CsvBackend, &dir).await.unwrap();
        assert!(saved.path.starts_with(&dir));
        assert_eq!(saved.bytes, CSV.len() as u64);
        assert_eq!(saved.url, "http://localhost:8000/api/export");
        let contents = std::fs::read_to_string(&saved.path).unwrap();
        assert!(contents.starts_with("player_id,Time Escolhido,Nome,Posição,Valor"));

        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }
}
