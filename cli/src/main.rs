//! cmanifest CLI entry point.

use clap::Parser;

use cmanifest_cli::commands::{dispatch, resolve_config, Cli};
use cmanifest_cli::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init(cli.verbose, config.log_level);

    if let Err(e) = dispatch(cli, config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
