//! Packager configuration management for `bale.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── storage    # [storage]
//! │   ├── compress   # [compress], [compress.css], [compress.js]
//! │   ├── compiler   # [[compilers]]
//! │   ├── templates  # [templates]
//! │   └── package    # [style.*], [script.*]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # BaleConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    CompilerConfig, CompressConfig, CompressorConfig, PackageConfig, StorageConfig,
    TemplatesConfig, Variant, normalize_ext,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing bale.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaleConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Storage root, URL and extra directories
    #[serde(default)]
    pub storage: StorageConfig,

    /// Compressor settings
    #[serde(default)]
    pub compress: CompressConfig,

    /// Client-side template compilation
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Per-file compilers, matched by extension
    #[serde(default)]
    pub compilers: Vec<CompilerConfig>,

    /// Stylesheet packages by name
    #[serde(default, rename = "style")]
    pub styles: BTreeMap<String, PackageConfig>,

    /// Script packages by name
    #[serde(default, rename = "script")]
    pub scripts: BTreeMap<String, PackageConfig>,
}

impl BaleConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cli.config).ok_or_else(|| {
            ConfigError::Validation(format!(
                "config file '{}' not found in {} or any parent directory",
                cli.config.display(),
                cwd.display()
            ))
        })?;

        let mut config = Self::from_path(&config_path)?;
        config.finalize(&config_path);
        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Set config path and root, then resolve every configured path.
    pub fn finalize(&mut self, config_path: &Path) {
        self.config_path = crate::utils::path::normalize_path(config_path);
        self.root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let root = self.root.clone();
        self.storage.normalize(&root);
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { args } => self.apply_build_args(args),
            Commands::List { verbose, .. } => crate::logger::set_verbose(*verbose),
            Commands::Templates { .. } => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);
        Self::update_option(&mut self.compress.source_maps, args.source_maps.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the whole configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.storage.validate(&mut diag);
        self.compress.validate(&mut diag);
        self.templates.validate(&mut diag);
        section::validate_compilers(&self.compilers, &mut diag);
        section::validate_packages("style", &self.styles, &mut diag);
        section::validate_packages("script", &self.scripts, &mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> BaleConfig {
    let (parsed, ignored) = BaleConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
