// Team logo loading: image file -> `data:<mime>;base64,...` URI.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("could not read logo {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("logo {path} is empty")]
    Empty { path: PathBuf },
}

/// MIME type for a logo file, guessed from its extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

/// Read a logo file and encode it as a data URI.
pub fn load_logo(path: &Path) -> Result<String, LogoError> {
    let bytes = std::fs::read(path).map_err(|source| LogoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(LogoError::Empty {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!("Encoded logo {} ({} bytes)", path.display(), bytes.len());
    Ok(encode_data_uri(mime_for(path), &bytes))
}

/// Resolve the logo field of the setup form. A blank entry means "no logo"
/// and is sent as `""`.
pub fn logo_field(input: &str) -> Result<String, LogoError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    load_logo(Path::new(trimmed))
}
