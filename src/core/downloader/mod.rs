pub mod client;

pub use client::{store_texture, TextureFetcher};
