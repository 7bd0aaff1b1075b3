//! `url()` rewriting for concatenated stylesheets.
//!
//! A stylesheet moved into a package output elsewhere in the tree keeps
//! working because its relative references are recomputed from the output
//! file's directory.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::utils::path::route;

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"url\(\s*(?:"([^"]*)"|'([^']*)'|([^)'"]*))\s*\)"#).unwrap()
    })
}

/// References left as written: fragments, remote and inline resources.
fn is_rewritable(url: &str) -> bool {
    !url.is_empty()
        && !["#", "http:", "https:", "data:", "//"]
            .iter()
            .any(|prefix| url.starts_with(prefix))
}

/// Rewrite the `url()` references of the stylesheet at `css_path` so they
/// resolve from the directory of `output_filename`.
pub fn rewrite_urls(content: &str, css_path: &str, output_filename: &str) -> String {
    let css_dir = route::dirname(css_path);
    let output_dir = route::dirname(output_filename);

    url_re()
        .replace_all(content, |caps: &Captures| {
            let (quote, url) = match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(m), _, _) => ("\"", m.as_str()),
                (_, Some(m), _) => ("'", m.as_str()),
                (_, _, Some(m)) => ("", m.as_str().trim()),
                _ => return caps[0].to_string(),
            };
            if !is_rewritable(url) {
                return caps[0].to_string();
            }
            let asset = match url.strip_prefix('/') {
                Some(rooted) => route::normpath(rooted),
                None => route::normpath(&route::join(css_dir, url)),
            };
            format!("url({quote}{}{quote})", route::relpath(&asset, output_dir))
        })
        .into_owned()
}
