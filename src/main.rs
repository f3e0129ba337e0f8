use std::process::ExitCode;

use clap::Parser;
use dollpack::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dollpack::run(Cli::parse()).await
}
