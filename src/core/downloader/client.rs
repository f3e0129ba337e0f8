use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::core::error::{PackError, PackResult};

/// Downloads skin textures into the pack's texture store.
pub struct TextureFetcher {
    client: Client,
    /// Bound for the whole download; longer than the profile lookups.
    timeout: Duration,
}

impl TextureFetcher {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Download `url` once and store it as `<dest_dir>/<base_name>.png`
    /// (base name lower-cased), replacing any previous file.
    pub async fn fetch(&self, url: &str, dest_dir: &Path, base_name: &str) -> PackResult<PathBuf> {
        info!("Downloading skin texture from {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| download_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PackError::DownloadFailed {
                url: url.to_string(),
                reason: format!("HTTP {}", status.as_u16()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| download_failed(url, e))?;
        debug!("Received {} bytes from {}", bytes.len(), url);

        store_texture(&bytes, dest_dir, base_name).await
    }
}

fn download_failed(url: &str, err: reqwest::Error) -> PackError {
    let reason = if err.is_timeout() {
        "timed out".to_string()
    } else {
        err.to_string()
    };
    PackError::DownloadFailed {
        url: url.to_string(),
        reason,
    }
}

/// Write `bytes` to `<dest_dir>/<lowercase base_name>.png`, creating the
/// directory if needed.
pub async fn store_texture(bytes: &[u8], dest_dir: &Path, base_name: &str) -> PackResult<PathBuf> {
    tokio::fs::create_dir_all(dest_dir)
        .await
        .map_err(|e| PackError::io(dest_dir, e))?;

    let dest = dest_dir.join(format!("{}.png", base_name.to_lowercase()));

    // Scoped so the handle is closed before the path is handed back.
    {
        let mut file = tokio::fs::File::create(&dest)
            .await
            .map_err(|e| PackError::io(&dest, e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| PackError::io(&dest, e))?;
        file.flush().await.map_err(|e| PackError::io(&dest, e))?;
    }

    info!("Saved skin texture to {:?}", dest);
    Ok(dest)
}
