use std::path::{Path, PathBuf};

use serde::Serialize;
use sha1::{Digest, Sha1};
use tokio::io::AsyncReadExt;

use crate::core::error::{PackError, PackResult};

const CHUNK_SIZE: usize = 8192;

/// A freshly built archive and its SHA-1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveDigest {
    pub path: PathBuf,
    pub sha1_hex: String,
}

/// Lower-case hex SHA-1 of the file at `path`, read in fixed-size chunks.
pub async fn digest(path: &Path) -> PackResult<String> {
    let unreadable = |source: std::io::Error| PackError::ArchiveUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::File::open(path).await.map_err(unreadable)?;
    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).await.map_err(unreadable)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}
