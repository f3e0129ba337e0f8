pub mod archive;
pub mod hasher;

pub use archive::build_archive;
pub use hasher::{digest, ArchiveDigest};
