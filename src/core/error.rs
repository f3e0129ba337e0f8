use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the doll pack pipeline.
/// Every stage returns `Result<T, PackError>`.
#[derive(Debug, Error)]
pub enum PackError {
    // ── Identity / profile lookups ──────────────────────
    #[error("Invalid player name {0:?}: expected 1-16 characters of A-Z, a-z, 0-9 or _")]
    InvalidPlayerId(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No texture profile for player {0}")]
    NoTextureProfile(String),

    #[error("Malformed texture data: {0}")]
    MalformedTextureData(String),

    #[error("Rate limited by {url} (HTTP 429), try again later")]
    RateLimited { url: String },

    #[error("Request to {url} timed out")]
    UpstreamTimeout { url: String },

    #[error("Upstream error from {url}: HTTP {status}")]
    UpstreamError { url: String, status: u16 },

    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    // ── Texture download ────────────────────────────────
    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    // ── Templates ───────────────────────────────────────
    #[error("Model template not found at {0:?}")]
    TemplateMissing(PathBuf),

    #[error("Template parse error in {path:?}: {source}")]
    TemplateParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Refusing to overwrite the model template {0:?} with a doll model")]
    TemplateCollision(PathBuf),

    // ── Archive ─────────────────────────────────────────
    #[error("pack.mcmeta not found at {0:?}")]
    ManifestMissing(PathBuf),

    #[error("Could not remove old archive {path:?} (is it open elsewhere?): {source}")]
    ArchiveReplaceFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Zip write error: {0}")]
    ArchiveWrite(#[from] zip::result::ZipError),

    #[error("Archive {path:?} unreadable after build: {source}")]
    ArchiveUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── IO / config ─────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Task join error: {0}")]
    Task(String),
}

/// Convenience alias used throughout the crate.
pub type PackResult<T> = Result<T, PackError>;

impl PackError {
    /// Whether the pipeline can carry on with degraded output.
    ///
    /// Only a missing model template qualifies: the item document is still
    /// written without it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PackError::TemplateMissing(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PackError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_template_missing_is_recoverable() {
        assert!(PackError::TemplateMissing(PathBuf::from("t.json")).is_recoverable());
        assert!(!PackError::ManifestMissing(PathBuf::from("pack.mcmeta")).is_recoverable());
        assert!(!PackError::PlayerNotFound("Steve".into()).is_recoverable());
    }

    #[test]
    fn upstream_error_mentions_status() {
        let err = PackError::UpstreamError {
            url: "https://api.mojang.com/x".into(),
            status: 503,
        };
        assert!(err.to_string().contains("503"));
    }
}
