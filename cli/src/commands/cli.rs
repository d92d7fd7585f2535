use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "advmem", version, about = "Advanced Memory operator tool")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file.
    Init(InitArgs),
    /// Print the effective configuration.
    Config(ConfigArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct InitArgs {
    /// Target file. Defaults to ~/.advmem/config.toml.
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
    pub format: ConfigFormat,

    /// Read this file instead of the default search locations.
    #[arg(long)]
    pub path: Option<PathBuf>,
}
