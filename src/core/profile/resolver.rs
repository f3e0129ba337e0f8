// ─── Identity Resolver ───
// Player name -> UUID -> session profile -> skin URL.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::info;

use crate::core::error::{PackError, PackResult};

use super::api::ProfileApi;
use super::model::{PlayerIdentity, ResolvedPlayer, TexturePayload, TextureProfile};

pub struct IdentityResolver<A> {
    api: A,
}

impl<A: ProfileApi> IdentityResolver<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Resolve `player_name` to its identity and skin URL.
    ///
    /// Each lookup is attempted exactly once; the profile lookup only runs
    /// after the identity lookup produced an id.
    pub async fn resolve(&self, player_name: &str) -> PackResult<ResolvedPlayer> {
        let identity = self.lookup_identity(player_name).await?;
        info!("Resolved '{}' to UUID {}", identity.name, identity.uuid);

        let profile = self.api.lookup_profile(&identity.uuid).await?;
        let has_properties = profile
            .properties
            .as_ref()
            .is_some_and(|props| !props.is_empty());
        if !has_properties {
            return Err(PackError::NoTextureProfile(player_name.to_string()));
        }

        let value = profile
            .textures_property()
            .and_then(|p| p.value.as_deref())
            .ok_or_else(|| PackError::NoTextureProfile(player_name.to_string()))?;

        let texture = decode_texture_property(value)?;
        info!("Skin URL for '{}': {}", identity.name, texture.skin_url);

        Ok(ResolvedPlayer { identity, texture })
    }

    async fn lookup_identity(&self, player_name: &str) -> PackResult<PlayerIdentity> {
        let response = self.api.lookup_identity(player_name).await?;
        let uuid = response
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| PackError::PlayerNotFound(player_name.to_string()))?;

        Ok(PlayerIdentity {
            name: response.name.unwrap_or_else(|| player_name.to_string()),
            uuid,
        })
    }
}

/// Decode the base64 `textures` property and pull out the skin URL.
pub fn decode_texture_property(value: &str) -> PackResult<TextureProfile> {
    let raw = STANDARD
        .decode(value.trim())
        .map_err(|e| PackError::MalformedTextureData(format!("invalid base64: {}", e)))?;
    let payload: TexturePayload = serde_json::from_slice(&raw)
        .map_err(|e| PackError::MalformedTextureData(format!("invalid JSON: {}", e)))?;

    let skin_url = payload
        .skin_url()
        .filter(|url| !url.is_empty())
        .ok_or_else(|| PackError::MalformedTextureData("no textures.SKIN.url".into()))?;

    Ok(TextureProfile {
        skin_url: skin_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::core::profile::model::{IdentityResponse, ProfileProperty, SessionProfile};

    const SKIN_URL: &str = "http://textures.minecraft.net/texture/abc";

    struct FakeApi {
        identity: IdentityResponse,
        profile: SessionProfile,
        rate_limited: bool,
        profile_calls: AtomicUsize,
    }

    impl FakeApi {
        fn new(identity: IdentityResponse, profile: SessionProfile) -> Self {
            Self {
                identity,
                profile,
                rate_limited: false,
                profile_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProfileApi for FakeApi {
        async fn lookup_identity(&self, _name: &str) -> PackResult<IdentityResponse> {
            if self.rate_limited {
                return Err(PackError::RateLimited {
                    url: "fake".into(),
                });
            }
            Ok(self.identity.clone())
        }

        async fn lookup_profile(&self, _uuid: &str) -> PackResult<SessionProfile> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.profile.clone())
        }
    }

    fn steve() -> IdentityResponse {
        IdentityResponse {
            id: Some("abc-123".into()),
            name: Some("Steve".into()),
        }
    }

    fn textures_value(json: serde_json::Value) -> String {
        STANDARD.encode(json.to_string())
    }

    fn profile_with(properties: Vec<ProfileProperty>) -> SessionProfile {
        SessionProfile {
            properties: Some(properties),
        }
    }

    fn textures_prop(value: String) -> ProfileProperty {
        ProfileProperty {
            name: Some("textures".into()),
            value: Some(value),
        }
    }

    #[tokio::test]
    async fn resolves_identity_and_skin_url() {
        let value = textures_value(serde_json::json!({
            "timestamp": 1,
            "textures": { "SKIN": { "url": SKIN_URL } }
        }));
        let resolver = IdentityResolver::new(FakeApi::new(
            steve(),
            profile_with(vec![textures_prop(value)]),
        ));

        let resolved = resolver.resolve("Steve").await.unwrap();
        assert_eq!(resolved.identity.uuid, "abc-123");
        assert_eq!(resolved.identity.name, "Steve");
        assert_eq!(resolved.texture.skin_url, SKIN_URL);
    }

    #[tokio::test]
    async fn missing_id_is_player_not_found_without_profile_call() {
        let resolver = IdentityResolver::new(FakeApi::new(
            IdentityResponse::default(),
            profile_with(vec![]),
        ));

        let err = resolver.resolve("Nobody").await.unwrap_err();
        assert!(matches!(err, PackError::PlayerNotFound(name) if name == "Nobody"));
        assert_eq!(resolver.api().profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn identity_failure_skips_profile_lookup() {
        let mut api = FakeApi::new(steve(), profile_with(vec![]));
        api.rate_limited = true;
        let resolver = IdentityResolver::new(api);

        let err = resolver.resolve("Steve").await.unwrap_err();
        assert!(matches!(err, PackError::RateLimited { .. }));
        assert_eq!(resolver.api().profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_properties_is_no_texture_profile() {
        let resolver = IdentityResolver::new(FakeApi::new(steve(), profile_with(vec![])));
        let err = resolver.resolve("Steve").await.unwrap_err();
        assert!(matches!(err, PackError::NoTextureProfile(_)));
    }

    #[tokio::test]
    async fn absent_properties_is_no_texture_profile() {
        let resolver =
            IdentityResolver::new(FakeApi::new(steve(), SessionProfile::default()));
        let err = resolver.resolve("Steve").await.unwrap_err();
        assert!(matches!(err, PackError::NoTextureProfile(_)));
    }

    #[tokio::test]
    async fn no_textures_entry_is_no_texture_profile() {
        let other = ProfileProperty {
            name: Some("signature_info".into()),
            value: Some("x".into()),
        };
        let resolver =
            IdentityResolver::new(FakeApi::new(steve(), profile_with(vec![other])));
        let err = resolver.resolve("Steve").await.unwrap_err();
        assert!(matches!(err, PackError::NoTextureProfile(_)));
    }

    #[tokio::test]
    async fn undecodable_value_is_malformed() {
        let resolver = IdentityResolver::new(FakeApi::new(
            steve(),
            profile_with(vec![textures_prop("%%% not base64 %%%".into())]),
        ));
        let err = resolver.resolve("Steve").await.unwrap_err();
        assert!(matches!(err, PackError::MalformedTextureData(_)));
    }

    #[test]
    fn non_json_payload_is_malformed() {
        let value = STANDARD.encode("not json at all");
        assert!(matches!(
            decode_texture_property(&value),
            Err(PackError::MalformedTextureData(_))
        ));
    }

    #[test]
    fn payload_without_skin_is_malformed() {
        let value = textures_value(serde_json::json!({ "textures": {} }));
        assert!(matches!(
            decode_texture_property(&value),
            Err(PackError::MalformedTextureData(_))
        ));
    }
}
