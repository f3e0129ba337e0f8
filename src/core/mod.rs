// ─── Dollpack Core ───
// Pipeline stages for building doll items into a resource pack.
//
// Architecture:
//   core/
//     profile/    — Name -> UUID -> session profile -> skin URL
//     downloader/ — Skin download into the texture store
//     template/   — Item + model JSON from doll_template.json
//     pack/       — Deterministic zip build + SHA-1 fingerprint
//     layout      — Resolved paths inside the pack
//     config      — JSON config file + API settings

pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod layout;
pub mod pack;
pub mod profile;
pub mod template;

#[cfg(test)]
pub(crate) mod test_support;
