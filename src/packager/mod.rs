//! Package orchestration.
//!
//! For each package:
//!
//! ```text
//! patterns ─resolve─▶ sources ─compile─▶ paths ─compress─▶ content (+ map)
//!                                                            │
//!                             save <output>.map ◀────────────┤
//!                             save <output> (+ directive) ◀──┘
//!                             notify observers
//! ```
//!
//! The map is saved before the file that names it.

mod observer;

pub use observer::{PackEvent, PackObserver};

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use std::sync::Arc;

use crate::compiler::CompilerStage;
use crate::compressor::{CompressOptions, Compressed, Compressor};
use crate::config::BaleConfig;
use crate::package::{AssetKind, Package, PackageError, PackageRegistry, PathResolver, Sources};
use crate::sourcemap::{comment, map_filename};
use crate::storage::{Storage, StorageError};
use crate::utils::path::route;
use crate::{debug, log};

pub struct Packager {
    storage: Arc<dyn Storage>,
    registry: PackageRegistry,
    compiler: CompilerStage,
    compressor: Compressor,
    template_ext: String,
    /// Output and map paths of every package, never read back as sources.
    outputs: FxHashSet<String>,
    observers: Vec<Box<dyn PackObserver>>,
}

impl Packager {
    pub fn new(storage: Arc<dyn Storage>, config: &BaleConfig) -> Self {
        let registry = PackageRegistry::from_config(config);
        let outputs = AssetKind::ALL
            .iter()
            .flat_map(|&kind| registry.iter(kind))
            .flat_map(|package| {
                let output = route::normpath(package.output_filename().trim_start_matches('/'));
                [map_filename(&output), output]
            })
            .collect();

        Self {
            registry,
            outputs,
            compiler: CompilerStage::new(storage.clone(), config.compilers.clone()),
            compressor: Compressor::new(
                storage.clone(),
                config.compress.clone(),
                config.templates.clone(),
                config.storage.static_dirs(),
            ),
            template_ext: config.templates.ext.clone(),
            observers: Vec::new(),
            storage,
        }
    }

    /// Register an observer for pack events.
    pub fn subscribe(&mut self, observer: impl PackObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    pub fn package_for(&self, kind: AssetKind, name: &str) -> Result<&Package, PackageError> {
        self.registry.get(kind, name)
    }

    fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(self.storage.as_ref(), &self.template_ext).excluding(&self.outputs)
    }

    /// Resolved sources of `package`.
    pub fn sources<'p>(&self, package: &'p Package) -> &'p Sources {
        package.sources(&self.resolver())
    }

    pub fn individual_url(&self, path: &str) -> Result<String, StorageError> {
        self.storage.url(path)
    }

    /// Logical path `path` compiles to, or `path` itself.
    pub fn compile_target(&self, path: &str) -> String {
        self.compiler.output_path(path)
    }

    pub fn compile(&self, paths: &[String], force: bool) -> Result<Vec<String>> {
        self.compiler.compile(paths, force)
    }

    /// Compiled templates of `package` on their own.
    pub fn pack_templates(&self, package: &Package) -> Result<String> {
        self.compressor.compile_templates(&self.sources(package).templates)
    }

    /// Build and write one package.
    ///
    /// Returns the written logical paths in write order: the map (when one
    /// is produced) and then the packed file.
    pub fn pack(&self, package: &Package) -> Result<Vec<String>> {
        let kind = package.kind();
        let output_filename = package.output_filename();
        let sources = self.sources(package);
        if sources.all.is_empty() {
            log!("pack"; "{} package `{}` matched no sources", kind, package.name());
        }

        let paths = self
            .compile(&sources.paths, true)
            .with_context(|| format!("Failed to pack {} package `{}`", kind, package.name()))?;
        let options = CompressOptions {
            output_filename: output_filename.to_string(),
            variant: package.variant(),
            templates: match kind {
                AssetKind::Script => sources.templates.clone(),
                AssetKind::Style => Vec::new(),
            },
        };
        let Compressed {
            mut content,
            source_map,
        } = self
            .compressor
            .compress(kind, &paths, &options)
            .with_context(|| format!("Failed to pack {} package `{}`", kind, package.name()))?;

        let mut written = Vec::with_capacity(2);
        if let Some(source_map) = source_map {
            let map_output = map_filename(output_filename);
            self.save_file(&map_output, &source_map)?;
            let map_url = self.storage.url(&map_output)?;
            content.push_str(&comment::directive(kind, route::basename(&map_url)));
            written.push(map_output);
        }
        self.save_file(output_filename, &content)?;
        written.push(output_filename.to_string());

        let event = PackEvent::new(package, &options);
        for observer in &self.observers {
            observer.notify(&event);
        }
        Ok(written)
    }

    fn save_file(&self, path: &str, content: &str) -> Result<()> {
        debug!("pack"; "saving {}", path);
        self.storage.save(path, content.as_bytes())?;
        Ok(())
    }
}
