use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "surfsup.yaml";

#[derive(Parser, Debug)]
#[command(name = "surfsup")]
#[command(about = "SurfsUp - Hawaii climate observations over a JSON API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Serve the climate API (default when no command is given)
    Serve {
        /// Path to the configuration file; built-in defaults apply if it is absent
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override the HTTP port
        #[arg(short, long)]
        port: Option<u16>,

        /// Override the database URL (e.g. sqlite://hawaii.sqlite)
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Validate configuration without starting the server
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Write a configuration file with all defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The chosen command, `serve` with defaults when none was given.
    pub fn command(self) -> Commands {
        self.command.unwrap_or_else(|| Commands::Serve {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            port: None,
            database: None,
        })
    }
}
