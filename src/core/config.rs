use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{PackError, PackResult};

const APP_DIR_NAME: &str = "dollpack";
const CONFIG_FILE: &str = "config.json";

/// Endpoints and timeouts for the remote profile service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub profiles_base_url: String,
    pub session_base_url: String,
    pub lookup_timeout_secs: u64,
    pub texture_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            profiles_base_url: "https://api.mojang.com".into(),
            session_base_url: "https://sessionserver.mojang.com".into(),
            lookup_timeout_secs: 10,
            texture_timeout_secs: 15,
        }
    }
}

impl ApiSettings {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn texture_timeout(&self) -> Duration {
        Duration::from_secs(self.texture_timeout_secs)
    }
}

/// On-disk configuration. Subdirectory overrides are relative to `pack_root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DollpackConfig {
    pub pack_root: PathBuf,
    pub pack_name: String,
    pub items_dir: Option<PathBuf>,
    pub models_dir: Option<PathBuf>,
    pub textures_dir: Option<PathBuf>,
    pub template_path: Option<PathBuf>,
    pub api: ApiSettings,
}

impl Default for DollpackConfig {
    fn default() -> Self {
        Self {
            pack_root: PathBuf::from("."),
            pack_name: "resource_pack".into(),
            items_dir: None,
            models_dir: None,
            textures_dir: None,
            template_path: None,
            api: ApiSettings::default(),
        }
    }
}

impl DollpackConfig {
    /// Load configuration from `explicit` if given, otherwise from the user
    /// config directory, falling back to defaults when no file exists there.
    pub fn load(explicit: Option<&Path>) -> PackResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> PackResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PackError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: DollpackConfig = serde_json::from_str(&raw).map_err(|e| {
            PackError::Config(format!("invalid config {}: {}", path.display(), e))
        })?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}

/// `<config dir>/dollpack/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE))
}
