//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::package::AssetKind;

/// Bale static asset packager CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: bale.toml)
    #[arg(short = 'C', long, global = true, default_value = "bale.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Pack configured packages into their output files
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// List packages and their resolved sources
    #[command(visible_alias = "l")]
    List {
        /// Only list packages of this kind
        #[arg(short, long, value_enum)]
        kind: Option<AssetKind>,

        /// Also print the URL of every source
        #[arg(short = 'V', long)]
        verbose: bool,
    },

    /// Print the compiled client-side templates of a script package
    #[command(visible_alias = "t")]
    Templates {
        /// Script package name
        #[arg(value_name = "NAME")]
        name: String,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Package names to pack. If omitted, packs every package.
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Only pack packages of this kind
    #[arg(short, long, value_enum)]
    pub kind: Option<AssetKind>,

    /// Generate source maps
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub source_maps: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
