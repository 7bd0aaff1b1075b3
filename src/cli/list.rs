//! `bale list`: show packages and what they resolve to.

use anyhow::Result;
use owo_colors::{OwoColorize, Stream, Style};

use super::{packager, select_packages};
use crate::config::BaleConfig;
use crate::log;
use crate::package::{AssetKind, Package};
use crate::packager::Packager;

pub fn list_packages(config: &BaleConfig, kind: Option<AssetKind>, verbose: bool) -> Result<()> {
    let packager = packager(config);
    if packager.registry().is_empty() {
        log!("list"; "no packages configured in {}", config.config_path.display());
        return Ok(());
    }
    print!("{}", render(&packager, kind, verbose)?);
    Ok(())
}

fn render(packager: &Packager, kind: Option<AssetKind>, verbose: bool) -> Result<String> {
    let mut out = String::new();

    for package in select_packages(packager, kind, &[])? {
        out.push_str(&format!(
            "{}.{} -> {}\n",
            package.kind(),
            package
                .name()
                .if_supports_color(Stream::Stdout, |n| n.style(Style::new().bold())),
            package.output_filename()
        ));

        if verbose {
            out.push_str(&metadata_line(package));
        }

        let sources = packager.sources(package);
        if sources.all.is_empty() {
            let note = format!("(no sources for {})", package.patterns().join(", "));
            out.push_str(&format!(
                "  {}\n",
                note.if_supports_color(Stream::Stdout, |t| t.style(Style::new().dimmed()))
            ));
        }
        for path in &sources.all {
            let compiled = packager.compile_target(path);
            let mut line = if compiled != *path {
                format!("  {path} ({compiled})")
            } else {
                format!("  {path}")
            };
            if sources.templates.contains(path) {
                line.push_str(" [template]");
            }
            if verbose {
                let url = packager.individual_url(path)?;
                line.push_str(&format!(
                    " {}",
                    url.if_supports_color(Stream::Stdout, |u| u.style(Style::new().dimmed()))
                ));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    Ok(out)
}

/// `  template=.. manifest=.. key=value` summary of package metadata.
fn metadata_line(package: &Package) -> String {
    let mut line = String::from(" ");
    if let Some(template) = package.template_name() {
        line.push_str(&format!(" template={template}"));
    }
    if let Some(variant) = package.variant() {
        line.push_str(&format!(" variant={variant:?}"));
    }
    line.push_str(&format!(" manifest={}", package.manifest()));
    for (key, value) in package.extra_context() {
        line.push_str(&format!(" {key}={value}"));
    }
    line.push('\n');
    line
}
