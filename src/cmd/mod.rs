//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`health`]. Each handler lives in its
//! own submodule.

pub mod health;
pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::ToggleError;

pub async fn dispatch(cli: Cli) -> Result<(), ToggleError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  toggleboard v{version} \u{2014} feature toggle registry\n\n  \
         No command provided. To get started:\n\n    \
         toggleboard run                   Serve the API on port 3000\n    \
         toggleboard health                Probe a running instance\n    \
         toggleboard --help                See all commands and options\n"
    );
}
