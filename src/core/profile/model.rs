// ─── Profile Service Models ───
// Typed views of the identity and session responses. Every field the
// service might omit is an `Option` and is checked explicitly by the resolver.

use serde::{Deserialize, Serialize};

/// Response of `GET /users/profiles/minecraft/{name}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Response of `GET /session/minecraft/profile/{uuid}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionProfile {
    #[serde(default)]
    pub properties: Option<Vec<ProfileProperty>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileProperty {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl SessionProfile {
    /// First property named `textures`.
    pub fn textures_property(&self) -> Option<&ProfileProperty> {
        self.properties
            .as_deref()?
            .iter()
            .find(|p| p.name.as_deref() == Some("textures"))
    }
}

/// Decoded body of the base64 `textures` property.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TexturePayload {
    #[serde(default)]
    pub textures: Option<TextureSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextureSet {
    #[serde(rename = "SKIN", default)]
    pub skin: Option<SkinTexture>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkinTexture {
    #[serde(default)]
    pub url: Option<String>,
}

impl TexturePayload {
    pub fn skin_url(&self) -> Option<&str> {
        self.textures.as_ref()?.skin.as_ref()?.url.as_deref()
    }
}

/// Identity returned by the name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerIdentity {
    pub name: String,
    pub uuid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureProfile {
    pub skin_url: String,
}

/// Result of a full resolution: who the player is and where their skin lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPlayer {
    pub identity: PlayerIdentity,
    pub texture: TextureProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textures_property_first_match_wins() {
        let profile: SessionProfile = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "properties": [
                { "name": "other", "value": "x" },
                { "name": "textures", "value": "first" },
                { "name": "textures", "value": "second" }
            ]
        }))
        .unwrap();
        assert_eq!(
            profile.textures_property().and_then(|p| p.value.as_deref()),
            Some("first")
        );
    }

    #[test]
    fn skin_url_missing_at_any_level_is_none() {
        let no_skin: TexturePayload =
            serde_json::from_value(serde_json::json!({ "textures": { "CAPE": {} } })).unwrap();
        assert_eq!(no_skin.skin_url(), None);

        let no_url: TexturePayload =
            serde_json::from_value(serde_json::json!({ "textures": { "SKIN": {} } })).unwrap();
        assert_eq!(no_url.skin_url(), None);

        let empty: TexturePayload = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty.skin_url(), None);
    }
}
