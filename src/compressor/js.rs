//! Script compression (closure compiler calling convention).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

use super::{CompressOptions, Compressed, Compressor, Strategy};
use crate::package::AssetKind;
use crate::sourcemap::comment;
use crate::utils::path::route;

impl Compressor {
    /// Compress scripts and the package's templates.
    ///
    /// In plain mode templates are compiled into the script before wrapping.
    /// With a source map they are compressed separately and appended after
    /// the mapped output, so the map never covers them.
    pub fn compress_js(&self, paths: &[String], options: &CompressOptions) -> Result<Compressed> {
        match self.strategy(AssetKind::Script, options, !paths.is_empty()) {
            Strategy::Plain => {
                let mut js = self.concatenate(paths)?;
                let templates = self.compile_templates(&options.templates)?;
                if !templates.is_empty() {
                    if !js.is_empty() {
                        js.push('\n');
                    }
                    js.push_str(&templates);
                }
                if !self.config.disable_wrapper {
                    js = self.config.js_wrapper.replacen("%s", &js, 1);
                }
                self.run_plain(AssetKind::Script, js).map(Compressed::plain)
            }
            Strategy::WithSourceMap => {
                let mut compressed = self.compress_js_with_source_map(paths)?;
                if !options.templates.is_empty() {
                    let templates = self.compile_templates(&options.templates)?;
                    let templates = self.run_plain(AssetKind::Script, templates)?;
                    if !compressed.content.ends_with('\n') {
                        compressed.content.push('\n');
                    }
                    compressed.content.push_str(templates.trim_end());
                }
                Ok(compressed)
            }
        }
    }

    /// Hand every script to the compressor as its own input and collect the
    /// combined map from a temporary file.
    fn compress_js_with_source_map(&self, paths: &[String]) -> Result<Compressed> {
        let compressor = &self.config.js;
        let mut cmd = self
            .base_command(compressor)
            .args(&compressor.arguments);

        let mut locations = Vec::with_capacity(paths.len());
        for path in paths {
            let location = self.locate(path)?;
            let url = self.storage.url(path)?;
            cmd = cmd
                .arg("--source_map_location_mapping")
                .arg(format!("{}|{url}", location.display()));

            let content = fs::read_to_string(&location)
                .with_context(|| format!("Failed to read {}", location.display()))?;
            if let Some(input) = comment::extract(&content)
                && !route::is_external_link(input)
            {
                let input_map = location.parent().unwrap_or(Path::new("/")).join(input);
                cmd = cmd
                    .arg("--source_map_input")
                    .arg(format!("{}|{}", location.display(), input_map.display()));
            }
            locations.push(location);
        }

        let map_file = NamedTempFile::new().context("Failed to create source map file")?;
        cmd = cmd.arg("--create_source_map").arg(map_file.path());
        for location in &locations {
            cmd = cmd.arg("--js").arg(location);
        }

        let output = cmd.run()?;
        let source_map = fs::read_to_string(map_file.path())
            .with_context(|| format!("Failed to read {}", map_file.path().display()))?;
        let js = comment::strip(&String::from_utf8_lossy(&output.stdout));

        Ok(Compressed {
            content: js,
            source_map: Some(source_map),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::compressor::testing::{Fixture, fake_closure, strings};
    use crate::config::{CompressorConfig, Variant};
    use serde_json::Value;

    fn cat() -> CompressorConfig {
        CompressorConfig {
            command: vec!["cat".into()],
            arguments: Vec::new(),
        }
    }

    #[test]
    fn test_plain_wraps_script() {
        let fx = Fixture::new();
        fx.write("js/a.js", "var a;");
        fx.write("js/b.js", "var b;");
        let compressor = fx.compressor(|config| config.js = cat());

        let out = compressor
            .compress_js(&strings(&["js/a.js", "js/b.js"]), &CompressOptions::default())
            .unwrap();
        assert_eq!(out.content, "(function() {\nvar a;\nvar b;\n}).call(this);");
        assert_eq!(out.source_map, None);
    }

    #[test]
    fn test_plain_templates_without_wrapper() {
        let fx = Fixture::new();
        fx.write("js/a.js", "var a;");
        fx.write("tpl/row.jst", "<li></li>");
        let compressor = fx.compressor(|config| config.disable_wrapper = true);

        let options = CompressOptions {
            templates: strings(&["tpl/row.jst"]),
            ..Default::default()
        };
        let out = compressor.compress_js(&strings(&["js/a.js"]), &options).unwrap();
        assert_eq!(
            out.content,
            "var a;\nwindow.JST = window.JST || {};\nwindow.JST['row'] = _.template('<li></li>');\n"
        );
    }

    #[test]
    fn test_with_source_map_chains_input_maps() {
        let fx = Fixture::new();
        fx.write("js/a.js", "var a;");
        fx.write("js/b.js", "var b;\n//# sourceMappingURL=b.js.map");
        fx.write("js/c.js", "var c;\n//# sourceMappingURL=data:application/json;base64,e30=");
        let command = fake_closure(&fx);
        let compressor = fx.compressor(|config| {
            config.source_maps = true;
            config.js = CompressorConfig {
                command,
                arguments: Vec::new(),
            };
        });

        let out = compressor
            .compress_js(&strings(&["js/a.js", "js/b.js", "js/c.js"]), &CompressOptions::default())
            .unwrap();

        assert!(out.content.starts_with("var a;\nvar b;"));
        assert!(!out.content.contains("closure.map"));
        let map: Value = serde_json::from_str(out.source_map.as_deref().unwrap()).unwrap();
        assert_eq!(map["sources"][0], "/static/js/a.js");
        assert_eq!(map["sources"][2], "/static/js/c.js");
        let inputs = map["inputs"].as_array().unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0], fx.root.join("js/b.js.map").display().to_string());
    }

    #[test]
    fn test_templates_stay_out_of_map() {
        let fx = Fixture::new();
        fx.write("js/a.js", "var a;");
        fx.write("tpl/row.jst", "<li></li>");
        let command = fake_closure(&fx);
        let compressor = fx.compressor(|config| {
            config.js = CompressorConfig {
                command,
                arguments: Vec::new(),
            };
        });

        let options = CompressOptions {
            variant: Some(Variant::SourceMaps),
            templates: strings(&["tpl/row.jst"]),
            ..Default::default()
        };
        let out = compressor.compress_js(&strings(&["js/a.js"]), &options).unwrap();

        assert_eq!(
            out.content,
            "var a;\nwindow.JST = window.JST || {};\nwindow.JST['row'] = _.template('<li></li>');"
        );
        let map: Value = serde_json::from_str(out.source_map.as_deref().unwrap()).unwrap();
        assert_eq!(map["sources"].as_array().unwrap().len(), 1);
        assert_eq!(map["sources"][0], "/static/js/a.js");
    }

    #[test]
    fn test_templates_only_package_is_plain() {
        let fx = Fixture::new();
        fx.write("tpl/row.jst", "x");
        let command = fake_closure(&fx);
        let compressor = fx.compressor(|config| {
            config.source_maps = true;
            config.disable_wrapper = true;
            config.js = CompressorConfig {
                command,
                arguments: Vec::new(),
            };
        });

        let options = CompressOptions {
            templates: strings(&["tpl/row.jst"]),
            ..Default::default()
        };
        let out = compressor.compress_js(&[], &options).unwrap();
        assert_eq!(out.source_map, None);
        assert!(out.content.contains("window.JST['row'] = _.template('x');"));
    }
}
