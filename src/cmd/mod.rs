//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`validate`], or [`health`]. Each handler
//! lives in its own submodule.

pub mod health;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::GatewayError;

pub async fn dispatch(cli: Cli) -> Result<(), GatewayError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Validate(ref args)) => validate::execute(args).await,
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
        "\n  keyrelay v{version} \u{2014} single-upstream forwarding gateway\n\n  \
         No command provided. To get started:\n\n    \
         keyrelay run                      Start the gateway (auto-detects ./keyrelay.yaml)\n    \
         keyrelay run -c gateway.toml      Start with a specific config file\n    \
         keyrelay validate keyrelay.yaml   Check a config file\n    \
         keyrelay --help                   See all commands and options\n"
    );
}
