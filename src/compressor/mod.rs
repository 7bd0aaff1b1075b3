//! Whole-package compression through external programs.
//!
//! # Strategies
//!
//! ```text
//! Plain          sources ──concat──▶ stdin │ compressor │ stdout ──▶ content
//! WithSourceMap  file paths ──────▶ compressor ──▶ content + map
//! ```
//!
//! Styles follow the cleancss calling convention, scripts the closure
//! compiler one. With no compressor configured for a kind, the plain
//! strategy returns the concatenation unchanged.

mod css;
mod js;
mod rewrite;
mod strategy;
mod template;
#[cfg(test)]
pub mod testing;

pub use strategy::Strategy;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{CompressConfig, CompressorConfig, TemplatesConfig, Variant};
use crate::package::AssetKind;
use crate::storage::{StaticDir, Storage, StorageError};
use crate::utils::exec::{Cmd, FilterRule};

/// Progress chatter compressors print to stderr on success.
const COMPRESSOR_FILTER: FilterRule =
    FilterRule::new(&["The compiler is waiting for input via stdin", "0 error(s), 0 warning(s)"]);

/// Options a package is compressed with, also handed to observers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompressOptions {
    pub output_filename: String,
    pub variant: Option<Variant>,
    /// Template sources compiled into script packages.
    pub templates: Vec<String>,
}

/// Result of compressing one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub content: String,
    /// Source map JSON, for the map-producing strategy only.
    pub source_map: Option<String>,
}

impl Compressed {
    fn plain(content: String) -> Self {
        Self {
            content,
            source_map: None,
        }
    }
}

pub struct Compressor {
    storage: Arc<dyn Storage>,
    config: CompressConfig,
    templates: TemplatesConfig,
    static_dirs: Vec<StaticDir>,
}

impl Compressor {
    pub fn new(
        storage: Arc<dyn Storage>,
        config: CompressConfig,
        templates: TemplatesConfig,
        static_dirs: Vec<StaticDir>,
    ) -> Self {
        Self {
            storage,
            config,
            templates,
            static_dirs,
        }
    }

    fn compressor(&self, kind: AssetKind) -> &CompressorConfig {
        match kind {
            AssetKind::Style => &self.config.css,
            AssetKind::Script => &self.config.js,
        }
    }

    /// Strategy a package of `kind` is compressed with.
    pub fn strategy(&self, kind: AssetKind, options: &CompressOptions, has_paths: bool) -> Strategy {
        Strategy::select(
            self.config.source_maps,
            options.variant,
            self.compressor(kind),
            has_paths,
        )
    }

    pub fn compress(
        &self,
        kind: AssetKind,
        paths: &[String],
        options: &CompressOptions,
    ) -> Result<Compressed> {
        match kind {
            AssetKind::Style => self.compress_css(paths, options),
            AssetKind::Script => self.compress_js(paths, options),
        }
    }

    /// Join the text of every source with newlines.
    pub fn concatenate(&self, paths: &[String]) -> Result<String> {
        let contents = paths
            .iter()
            .map(|path| self.storage.read_text(path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contents.join("\n"))
    }

    /// Pipe `content` through the plain compressor of `kind`.
    fn run_plain(&self, kind: AssetKind, content: String) -> Result<String> {
        let compressor = self.compressor(kind);
        if !compressor.is_enabled() {
            return Ok(content);
        }
        let output = self
            .base_command(compressor)
            .args(&compressor.arguments)
            .stdin(content)
            .run()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Compressor program with the configured timeout, before any arguments.
    fn base_command(&self, compressor: &CompressorConfig) -> Cmd {
        Cmd::from_slice(&compressor.command)
            .timeout(self.config.timeout())
            .filter(&COMPRESSOR_FILTER)
    }

    /// Physical location of a source.
    fn locate(&self, path: &str) -> Result<PathBuf> {
        self.storage
            .find(path)
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
            .with_context(|| format!("Cannot compress `{path}`"))
    }
}
