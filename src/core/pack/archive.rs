// ─── Archive Builder ───
// Repackages pack.mcmeta, pack.png and assets/ into a single zip.
// Entries are written in sorted order with fixed metadata so that an
// unchanged tree always produces the same bytes.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::error::{PackError, PackResult};
use crate::core::layout::{ASSETS_DIR, ICON_FILE, MANIFEST_FILE};

/// A file on disk and the name it gets inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ArchiveEntry {
    source: PathBuf,
    name: String,
}

/// Build `<output_path>` from the pack tree at `pack_root`.
///
/// Any previous archive at `output_path` is removed first and a failure to
/// remove it aborts the build.
pub fn build_archive(pack_root: &Path, output_path: &Path) -> PackResult<PathBuf> {
    remove_stale_archive(output_path)?;

    let manifest = pack_root.join(MANIFEST_FILE);
    if !manifest.is_file() {
        return Err(PackError::ManifestMissing(manifest));
    }

    let mut entries = vec![ArchiveEntry {
        source: manifest,
        name: MANIFEST_FILE.to_string(),
    }];

    let icon = pack_root.join(ICON_FILE);
    if icon.is_file() {
        entries.push(ArchiveEntry {
            source: icon,
            name: ICON_FILE.to_string(),
        });
    }

    entries.extend(collect_assets(pack_root)?);

    info!(
        "Writing {} entries to {:?}",
        entries.len(),
        output_path
    );

    let file = File::create(output_path).map_err(|e| PackError::io(output_path, e))?;
    if let Err(e) = write_entries(file, &entries) {
        // Never leave a half-written archive behind.
        if let Err(cleanup) = std::fs::remove_file(output_path) {
            warn!(
                "Could not remove partial archive {:?}: {}",
                output_path, cleanup
            );
        }
        return Err(e);
    }

    info!("Archive ready: {:?}", output_path);
    Ok(output_path.to_path_buf())
}

/// Anything already at `output_path` must go, not only regular files.
fn remove_stale_archive(output_path: &Path) -> PackResult<()> {
    if std::fs::symlink_metadata(output_path).is_err() {
        return Ok(());
    }

    info!("Removing previous archive {:?}", output_path);
    std::fs::remove_file(output_path).map_err(|source| PackError::ArchiveReplaceFailed {
        path: output_path.to_path_buf(),
        source,
    })
}

/// Every file under `assets/`, symlinks followed, sorted by archive name.
fn collect_assets(pack_root: &Path) -> PackResult<Vec<ArchiveEntry>> {
    let assets_dir = pack_root.join(ASSETS_DIR);
    if !assets_dir.is_dir() {
        warn!("No assets directory at {:?}; the archive will hold metadata only", assets_dir);
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(&assets_dir).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(assets_dir.as_path()).to_path_buf();
            PackError::io(path, std::io::Error::other(e.to_string()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let source = entry.into_path();
        let name = archive_name(pack_root, &source)?;
        entries.push(ArchiveEntry { source, name });
    }

    if entries.is_empty() {
        warn!("Assets directory {:?} is empty", assets_dir);
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Path relative to `pack_root`, joined with `/` on every platform.
fn archive_name(pack_root: &Path, path: &Path) -> PackResult<String> {
    let relative = path.strip_prefix(pack_root).map_err(|_| {
        PackError::io(
            path,
            std::io::Error::other(format!("not under pack root {:?}", pack_root)),
        )
    })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644)
}

fn write_entries<W: Write + Seek>(writer: W, entries: &[ArchiveEntry]) -> PackResult<()> {
    let mut zip = ZipWriter::new(writer);
    let options = entry_options();

    for entry in entries {
        debug!("  + {}", entry.name);
        zip.start_file(entry.name.as_str(), options)?;
        let mut file = File::open(&entry.source).map_err(|e| PackError::io(&entry.source, e))?;
        std::io::copy(&mut file, &mut zip).map_err(|e| PackError::io(&entry.source, e))?;
    }

    zip.finish()?;
    Ok(())
}
