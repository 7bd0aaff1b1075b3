//! Packages and the package registry.
//!
//! A [`Package`] is a named, ordered bundle of sources written to one output
//! file. Its sources are resolved from glob patterns on first use and never
//! re-globbed afterwards.
//!
//! - [`AssetKind`]: style or script
//! - [`PathResolver`]: pattern expansion and template partitioning
//! - [`PackageRegistry`]: packages by kind and name

mod kind;
mod registry;
mod resolve;

pub use kind::AssetKind;
pub use registry::PackageRegistry;
pub use resolve::{PathResolver, Sources};

use std::cell::OnceCell;
use thiserror::Error;

use crate::config::{PackageConfig, Variant};

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("no {kind} package named `{name}`")]
    NotFound { kind: AssetKind, name: String },
}

/// A named bundle of sources and its packing metadata.
#[derive(Debug)]
pub struct Package {
    name: String,
    kind: AssetKind,
    config: PackageConfig,
    sources: OnceCell<Sources>,
}

impl Package {
    pub fn new(name: impl Into<String>, kind: AssetKind, config: PackageConfig) -> Self {
        Self {
            name: name.into(),
            kind,
            config,
            sources: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Resolved sources, computed with `resolver` on first call only.
    pub fn sources(&self, resolver: &PathResolver<'_>) -> &Sources {
        self.sources
            .get_or_init(|| resolver.resolve(&self.config.source_filenames))
    }

    pub fn patterns(&self) -> &[String] {
        &self.config.source_filenames
    }

    pub fn output_filename(&self) -> &str {
        &self.config.output_filename
    }

    pub fn variant(&self) -> Option<Variant> {
        self.config.variant
    }

    pub fn extra_context(&self) -> &toml::Table {
        &self.config.extra_context
    }

    pub fn template_name(&self) -> Option<&str> {
        self.config.template_name.as_deref()
    }

    pub fn manifest(&self) -> bool {
        self.config.manifest
    }
}
