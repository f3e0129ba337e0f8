// ─── Pack Layout ───
// Resolved filesystem locations inside a resource pack.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::config::DollpackConfig;
use crate::core::error::{PackError, PackResult};

pub const MANIFEST_FILE: &str = "pack.mcmeta";
pub const ICON_FILE: &str = "pack.png";
pub const ASSETS_DIR: &str = "assets";
pub const TEMPLATE_FILE: &str = "doll_template.json";

/// Longest name the profile service accepts.
pub const MAX_PLAYER_ID_LEN: usize = 16;

/// Trim `raw` and accept it only as a Minecraft name: 1-16 ASCII letters,
/// digits or `_`. The id ends up in file names and request paths.
pub fn validate_player_id(raw: &str) -> PackResult<String> {
    let trimmed = raw.trim();
    let valid = !trimmed.is_empty()
        && trimmed.len() <= MAX_PLAYER_ID_LEN
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');

    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(PackError::InvalidPlayerId(raw.to_string()))
    }
}

/// Every path a pipeline stage touches, built once from the config.
#[derive(Debug, Clone)]
pub struct PackLayout {
    pub pack_root: PathBuf,
    pub pack_name: String,
    pub items_dir: PathBuf,
    pub models_dir: PathBuf,
    pub textures_dir: PathBuf,
    pub template_path: PathBuf,
}

impl PackLayout {
    /// Default Minecraft layout under `pack_root`.
    pub fn new(pack_root: impl Into<PathBuf>, pack_name: impl Into<String>) -> Self {
        let pack_root = pack_root.into();
        let minecraft = pack_root.join(ASSETS_DIR).join("minecraft");
        let models_dir = minecraft.join("models").join("item");
        Self {
            items_dir: minecraft.join("items"),
            textures_dir: minecraft.join("textures").join("item").join("dolls"),
            template_path: models_dir.join(TEMPLATE_FILE),
            models_dir,
            pack_name: pack_name.into(),
            pack_root,
        }
    }

    pub fn from_config(config: &DollpackConfig) -> Self {
        let mut layout = Self::new(&config.pack_root, config.pack_name.clone());
        let root = &config.pack_root;
        if let Some(dir) = &config.items_dir {
            layout.items_dir = root.join(dir);
        }
        if let Some(dir) = &config.models_dir {
            layout.models_dir = root.join(dir);
            layout.template_path = layout.models_dir.join(TEMPLATE_FILE);
        }
        if let Some(dir) = &config.textures_dir {
            layout.textures_dir = root.join(dir);
        }
        if let Some(path) = &config.template_path {
            layout.template_path = root.join(path);
        }
        layout
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.pack_root.join(MANIFEST_FILE)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.pack_root.join(format!("{}.zip", self.pack_name))
    }

    /// `doll_<id>.json`, with the id lower-cased.
    pub fn document_file_name(player_id: &str) -> String {
        format!("doll_{}.json", player_id.to_lowercase())
    }

    pub fn item_document_path(&self, player_id: &str) -> PathBuf {
        self.items_dir.join(Self::document_file_name(player_id))
    }

    pub fn model_document_path(&self, player_id: &str) -> PathBuf {
        self.models_dir.join(Self::document_file_name(player_id))
    }

    pub fn texture_path(&self, player_id: &str) -> PathBuf {
        self.textures_dir
            .join(format!("{}.png", player_id.to_lowercase()))
    }

    /// Texture already present in the store, e.g. uploaded by hand.
    pub fn existing_texture(&self, player_id: &str) -> Option<PathBuf> {
        let path = self.texture_path(player_id);
        path.is_file().then_some(path)
    }

    /// Create the pack root and `assets/minecraft` when the pack does not
    /// exist yet. An existing root is left untouched.
    ///
    /// Returns `true` when a new skeleton was created.
    pub fn ensure_skeleton(&self) -> PackResult<bool> {
        if self.pack_root.is_dir() {
            return Ok(false);
        }

        let minecraft = self.pack_root.join(ASSETS_DIR).join("minecraft");
        std::fs::create_dir_all(&minecraft).map_err(|e| PackError::io(&minecraft, e))?;
        info!("Created resource pack skeleton at {:?}", self.pack_root);
        warn!("Add {:?} before packaging", self.manifest_path());
        Ok(true)
    }
}
