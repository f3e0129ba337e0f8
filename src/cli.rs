use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Builds doll items from player skins and repackages the resource pack.
#[derive(Debug, Parser)]
#[command(name = "dollpack", version, about)]
pub struct Cli {
    /// Config file (defaults to <config dir>/dollpack/config.json)
    #[arg(long, global = true, env = "DOLLPACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Resource pack root, overrides the config file
    #[arg(long, global = true)]
    pub pack_root: Option<PathBuf>,

    /// Archive name without `.zip`, overrides the config file
    #[arg(long, global = true)]
    pub pack_name: Option<String>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a player's skin, write the doll documents and rebuild the pack
    Run {
        /// Player name; prompted for when omitted
        name: Option<String>,
    },
    /// Write doll documents for a texture that was added by hand
    Docs { name: String },
    /// Rebuild the pack archive and print its SHA-1
    Pack,
}
