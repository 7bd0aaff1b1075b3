//! Bale - A static asset packager for stylesheets and scripts.

mod cli;
mod compiler;
mod compressor;
mod config;
mod logger;
mod package;
mod packager;
mod sourcemap;
mod storage;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::BaleConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = BaleConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { args } => cli::build::build_packages(&config, args).map(|_| ()),
        Commands::List { kind, verbose } => cli::list::list_packages(&config, *kind, *verbose),
        Commands::Templates { name } => cli::templates::print_templates(&config, name),
    }
}
