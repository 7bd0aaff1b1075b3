//! Stylesheet compression (cleancss calling convention).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::{CompressOptions, Compressed, Compressor, Strategy, rewrite};
use crate::package::AssetKind;
use crate::sourcemap::{SourceMapRelocator, comment, map_filename};
use crate::utils::path::route;

/// Flags that keep cleancss output close enough to the input for its maps
/// to stay accurate. Used when no arguments are configured.
const SOURCE_MAP_FLAGS: &[&str] = &[
    "--skip-advanced",
    "--skip-media-merging",
    "--skip-restructuring",
    "--skip-shorthand-compacting",
    "--keep-line-breaks",
];

impl Compressor {
    pub fn compress_css(&self, paths: &[String], options: &CompressOptions) -> Result<Compressed> {
        match self.strategy(AssetKind::Style, options, !paths.is_empty()) {
            Strategy::Plain => {
                let css = self.concatenate_and_rewrite(paths, &options.output_filename)?;
                self.run_plain(AssetKind::Style, css).map(Compressed::plain)
            }
            Strategy::WithSourceMap => self.compress_css_with_source_map(paths, &options.output_filename),
        }
    }

    /// Concatenate stylesheets, rewriting their `url()` references for the
    /// location of `output_filename`.
    pub fn concatenate_and_rewrite(&self, paths: &[String], output_filename: &str) -> Result<String> {
        let stylesheets = paths
            .iter()
            .map(|path| {
                let content = self.storage.read_text(path)?;
                Ok(rewrite::rewrite_urls(&content, path, output_filename))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(stylesheets.join("\n"))
    }

    /// Let the compressor write the packed file and its map in place, then
    /// read both back.
    fn compress_css_with_source_map(&self, paths: &[String], output_filename: &str) -> Result<Compressed> {
        let compressor = &self.config.css;
        let output_path = self.storage.path(output_filename)?;
        let output_dir = output_path.parent().unwrap_or(Path::new("/")).to_path_buf();
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        let sources = paths
            .iter()
            .map(|path| self.locate(path))
            .collect::<Result<Vec<_>>>()?;

        let mut cmd = self.base_command(compressor).arg("--source-map");
        cmd = if compressor.arguments.is_empty() {
            cmd.args(SOURCE_MAP_FLAGS)
        } else {
            cmd.args(&compressor.arguments)
        };
        cmd.arg("--output")
            .arg(&output_path)
            .args(&sources)
            .cwd(&output_dir)
            .run()?;

        let map_path = self.storage.path(&map_filename(output_filename))?;
        let css = fs::read_to_string(&output_path)
            .with_context(|| format!("Failed to read {}", output_path.display()))?;
        let source_map = fs::read_to_string(&map_path)
            .with_context(|| format!("Failed to read {}", map_path.display()))?;
        let css = comment::strip(&css);

        let dir_url = self.storage.url(route::dirname(output_filename))?;
        let output_url = format!(
            "{}/{}",
            dir_url.trim_end_matches('/'),
            route::basename(output_filename)
        );

        let relocator = SourceMapRelocator::new(self.storage.as_ref(), &self.static_dirs);
        let source_map = relocator.relocate(&source_map, &output_dir, &output_url)?;

        Ok(Compressed {
            content: css,
            source_map: Some(source_map),
        })
    }
}
