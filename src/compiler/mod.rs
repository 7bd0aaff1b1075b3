//! Per-file compilation of sources written in a compiled dialect.
//!
//! Each configured compiler claims a set of extensions. A matching source is
//! compiled into a sibling with the compiler's output extension, and the
//! sibling takes the source's place in the packing order:
//!
//! ```text
//! css/theme.scss  ──sassc──▶  css/theme.css
//! js/app.coffee   ──coffee──▶ js/app.js
//! ```

mod command;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use crate::config::{CompilerConfig, normalize_ext};
use crate::debug;
use crate::storage::{Storage, StorageError};
use crate::utils::exec::Cmd;
use crate::utils::path::route;

use command::{build_vars, resolve_args};

/// Runs configured compilers over package sources.
pub struct CompilerStage {
    storage: Arc<dyn Storage>,
    compilers: Vec<CompilerConfig>,
}

impl CompilerStage {
    pub fn new(storage: Arc<dyn Storage>, compilers: Vec<CompilerConfig>) -> Self {
        Self { storage, compilers }
    }

    /// Compile every path with a registered extension.
    ///
    /// Returns the input sequence with compiled siblings substituted. Without
    /// `force`, a sibling at least as new as its source is reused.
    pub fn compile(&self, paths: &[String], force: bool) -> Result<Vec<String>> {
        paths
            .iter()
            .map(|path| match self.compiler_for(path) {
                Some(compiler) => self.compile_one(compiler, path, force),
                None => Ok(path.clone()),
            })
            .collect()
    }

    /// Logical path a source compiles to, or the path itself.
    pub fn output_path(&self, path: &str) -> String {
        match self.compiler_for(path) {
            Some(compiler) => compiled_path(path, &compiler.output_extension),
            None => path.to_string(),
        }
    }

    fn compiler_for(&self, path: &str) -> Option<&CompilerConfig> {
        let ext = extension(path)?;
        let ext = normalize_ext(ext);
        self.compilers
            .iter()
            .find(|c| c.extensions.iter().any(|e| normalize_ext(e) == ext))
    }

    fn compile_one(&self, compiler: &CompilerConfig, path: &str, force: bool) -> Result<String> {
        let compiled = compiled_path(path, &compiler.output_extension);
        let infile = self
            .storage
            .find(path)
            .ok_or_else(|| StorageError::NotFound(path.to_string()))?;
        let outfile = self.storage.path(&compiled)?;

        if !force && !is_outdated(&infile, &outfile) {
            debug!("compile"; "{} is up to date", compiled);
            return Ok(compiled);
        }
        debug!("compile"; "{} -> {} ({})", path, compiled, compiler.display_name());

        if let Some(parent) = outfile.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let vars = build_vars(&infile, &outfile);
        let mut cmd = Cmd::from_slice(&resolve_args(&compiler.command, &vars))
            .envs(&vars)
            .timeout(compiler.timeout());
        if let Some(dir) = infile.parent() {
            cmd = cmd.cwd(dir);
        }
        let output = cmd
            .run()
            .with_context(|| format!("Failed to compile `{path}`"))?;

        if compiler.stdout {
            self.storage.save(&compiled, &output.stdout)?;
        }
        Ok(compiled)
    }
}

/// Extension of the final path segment, without the dot.
fn extension(path: &str) -> Option<&str> {
    let name = route::basename(path);
    let (stem, ext) = name.rsplit_once('.')?;
    (!stem.is_empty()).then_some(ext)
}

fn compiled_path(path: &str, output_extension: &str) -> String {
    let output_extension = output_extension.trim_start_matches('.');
    match extension(path) {
        Some(ext) => format!("{}.{output_extension}", &path[..path.len() - ext.len() - 1]),
        None => format!("{path}.{output_extension}"),
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Whether `outfile` is missing or older than `infile`.
fn is_outdated(infile: &Path, outfile: &Path) -> bool {
    match (mtime(infile), mtime(outfile)) {
        (_, None) => true,
        (Some(source), Some(compiled)) => source > compiled,
        (None, Some(_)) => false,
    }
}
