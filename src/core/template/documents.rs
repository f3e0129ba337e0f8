// ─── Doll Documents ───
// Item and model JSON for a single doll. The model document is instantiated
// from `doll_template.json` by replacing the `{player_id}` placeholder.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::core::error::{PackError, PackResult};
use crate::core::layout::PackLayout;

pub const PLAYER_ID_TOKEN: &str = "{player_id}";

/// Paths written for one doll. `model` carries the reason when the model
/// document could not be produced.
#[derive(Debug)]
pub struct DollDocuments {
    pub item_path: PathBuf,
    pub model: PackResult<PathBuf>,
}

impl DollDocuments {
    /// A missing template is tolerated; any other model failure is not.
    pub fn succeeded(&self) -> bool {
        match &self.model {
            Ok(_) => true,
            Err(e) => e.is_recoverable(),
        }
    }
}

/// `{ "model": { "type": "minecraft:model", "model": "item/doll_<id>" } }`
pub fn build_item_document(player_id: &str) -> Value {
    json!({
        "model": {
            "type": "minecraft:model",
            "model": format!("item/doll_{}", player_id.to_lowercase())
        }
    })
}

/// Load the model template and substitute the lower-cased player id into
/// every string value containing the placeholder.
pub async fn build_model_document(template_path: &Path, player_id: &str) -> PackResult<Value> {
    let raw = match tokio::fs::read_to_string(template_path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PackError::TemplateMissing(template_path.to_path_buf()));
        }
        Err(e) => return Err(PackError::io(template_path, e)),
    };

    let mut document: Value =
        serde_json::from_str(&raw).map_err(|source| PackError::TemplateParseError {
            path: template_path.to_path_buf(),
            source,
        })?;

    substitute_placeholder(&mut document, PLAYER_ID_TOKEN, &player_id.to_lowercase());
    Ok(document)
}

/// Replace `token` inside string leaves at any depth. Object keys are
/// never touched.
pub fn substitute_placeholder(value: &mut Value, token: &str, replacement: &str) {
    match value {
        Value::String(s) if s.contains(token) => {
            *s = s.replace(token, replacement);
        }
        Value::Array(items) => {
            for item in items {
                substitute_placeholder(item, token, replacement);
            }
        }
        Value::Object(map) => {
            for (_key, item) in map.iter_mut() {
                substitute_placeholder(item, token, replacement);
            }
        }
        _ => {}
    }
}

/// Write the item document, then the model document if the template is
/// available. A template problem never prevents the item document.
pub async fn write_doll_documents(layout: &PackLayout, player_id: &str) -> PackResult<DollDocuments> {
    let item_path = layout.item_document_path(player_id);
    if item_path == layout.template_path {
        return Err(PackError::TemplateCollision(item_path));
    }
    write_json(&item_path, &build_item_document(player_id)).await?;
    info!("Wrote item document {:?}", item_path);

    let model_path = layout.model_document_path(player_id);
    let model = if model_path == layout.template_path {
        warn!("Model document for '{}' would replace the template", player_id);
        Err(PackError::TemplateCollision(model_path))
    } else {
        write_model_document(layout, player_id, model_path).await?
    };

    Ok(DollDocuments { item_path, model })
}

/// Outer error aborts the write; the inner result is the model outcome.
async fn write_model_document(
    layout: &PackLayout,
    player_id: &str,
    model_path: PathBuf,
) -> PackResult<PackResult<PathBuf>> {
    let model = match build_model_document(&layout.template_path, player_id).await {
        Ok(document) => {
            write_json(&model_path, &document).await?;
            info!("Wrote model document {:?}", model_path);
            Ok(model_path)
        }
        Err(e) => {
            warn!("Skipping model document: {}", e);
            Err(e)
        }
    };
    Ok(model)
}

async fn write_json(path: &Path, document: &Value) -> PackResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PackError::io(parent, e))?;
    }

    let text = serde_json::to_string_pretty(document).map_err(|e| {
        PackError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    tokio::fs::write(path, text)
        .await
        .map_err(|e| PackError::io(path, e))
}
