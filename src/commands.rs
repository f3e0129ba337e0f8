use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::core::config::DollpackConfig;
use crate::core::downloader::TextureFetcher;
use crate::core::error::{PackError, PackResult};
use crate::core::http::build_http_client;
use crate::core::layout::{validate_player_id, PackLayout};
use crate::core::pack::{self, ArchiveDigest};
use crate::core::profile::{IdentityResolver, MojangApi, ProfileApi, ResolvedPlayer};
use crate::core::template::{self, DollDocuments};

/// Everything the pipeline needs, built once from the config.
pub struct PipelineContext<A> {
    pub layout: PackLayout,
    pub resolver: IdentityResolver<A>,
    pub fetcher: TextureFetcher,
}

impl PipelineContext<MojangApi> {
    pub fn from_config(config: &DollpackConfig) -> PackResult<Self> {
        let client = build_http_client()?;
        Ok(Self {
            layout: PackLayout::from_config(config),
            resolver: IdentityResolver::new(MojangApi::new(client.clone(), &config.api)),
            fetcher: TextureFetcher::new(client, config.api.texture_timeout()),
        })
    }
}

/// A resolved player whose skin is now in the texture store.
#[derive(Debug)]
pub struct FetchedSkin {
    pub player: ResolvedPlayer,
    pub texture_path: PathBuf,
}

/// Outcome of every stage of one run.
#[derive(Debug)]
pub struct PipelineReport {
    pub player_id: String,
    pub skin: PackResult<FetchedSkin>,
    /// `None` when the skin stage failed and documents were not attempted.
    pub documents: Option<PackResult<DollDocuments>>,
    pub package: PackResult<ArchiveDigest>,
}

impl PipelineReport {
    /// The run counts as successful when the pack was rebuilt.
    pub fn succeeded(&self) -> bool {
        self.package.is_ok()
    }

    /// Translate each stage outcome into operator-facing log lines.
    pub fn log_summary(&self) {
        match &self.skin {
            Ok(skin) => info!(
                "Skin for {} ({}) stored at {:?}",
                skin.player.identity.name, skin.player.identity.uuid, skin.texture_path
            ),
            Err(e) => error!("Could not fetch skin for '{}': {}", self.player_id, e),
        }

        match &self.documents {
            None => warn!("Skipped JSON generation because no skin was fetched"),
            Some(Err(e)) => error!("Could not write doll documents: {}", e),
            Some(Ok(docs)) => {
                info!("Item document: {:?}", docs.item_path);
                match &docs.model {
                    Ok(path) => info!("Model document: {:?}", path),
                    Err(e) if e.is_recoverable() => {
                        warn!("Model document not created: {}", e)
                    }
                    Err(e) => error!("Model document failed: {}", e),
                }
            }
        }

        match &self.package {
            Ok(digest) => info!("Pack {:?} SHA-1: {}", digest.path, digest.sha1_hex),
            Err(e) => error!("Packaging failed: {}", e),
        }
    }
}

/// Resolve the player and download their skin into the texture store.
pub async fn fetch_skin<A: ProfileApi>(
    ctx: &PipelineContext<A>,
    player_id: &str,
) -> PackResult<FetchedSkin> {
    let player_id = validate_player_id(player_id)?;
    let player = ctx.resolver.resolve(&player_id).await?;
    let texture_path = ctx
        .fetcher
        .fetch(&player.texture.skin_url, &ctx.layout.textures_dir, &player_id)
        .await?;
    Ok(FetchedSkin {
        player,
        texture_path,
    })
}

/// Write the doll documents for a texture that was placed by hand.
pub async fn generate_documents(layout: &PackLayout, player_id: &str) -> PackResult<DollDocuments> {
    let player_id = validate_player_id(player_id)?;
    match layout.existing_texture(&player_id) {
        Some(path) => info!("Found texture {:?}", path),
        None => warn!(
            "No texture at {:?} yet; upload one before using the doll",
            layout.texture_path(&player_id)
        ),
    }
    template::write_doll_documents(layout, &player_id).await
}

/// Rebuild the archive and fingerprint the file just written. The zip is
/// written on the blocking pool.
pub async fn package(layout: &PackLayout) -> PackResult<ArchiveDigest> {
    let pack_root = layout.pack_root.clone();
    let output_path = layout.archive_path();
    let path = tokio::task::spawn_blocking(move || pack::build_archive(&pack_root, &output_path))
        .await
        .map_err(|e| PackError::Task(e.to_string()))??;
    let sha1_hex = pack::digest(&path).await?;
    Ok(ArchiveDigest { path, sha1_hex })
}

/// Full run: skin -> documents (only if the skin was stored) -> package
/// (always).
pub async fn run_doll<A: ProfileApi>(ctx: &PipelineContext<A>, player_id: &str) -> PipelineReport {
    info!("Processing player '{}'", player_id);

    let skin = fetch_skin(ctx, player_id).await;

    let documents = match &skin {
        Ok(_) => Some(generate_documents(&ctx.layout, player_id).await),
        Err(_) => None,
    };

    info!("Refreshing resource pack archive");
    let package = package(&ctx.layout).await;

    PipelineReport {
        player_id: player_id.to_string(),
        skin,
        documents,
        package,
    }
}
