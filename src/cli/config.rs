use clap::{Args, Subcommand};

use crate::config::Config as AppConfig;
use crate::error::Result;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show configuration file path
    Path,

    /// List all available configuration keys
    Keys,
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            println!("Current configuration:");
            for key in AppConfig::KEYS {
                println!("  {}: {}", key, config.get(key)?);
            }
        }

        ConfigCommands::Get { key } => {
            println!("{}", config.get(&key)?);
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }

        ConfigCommands::Keys => {
            for key in AppConfig::KEYS {
                println!("{}", key);
            }
        }
    }

    Ok(())
}
