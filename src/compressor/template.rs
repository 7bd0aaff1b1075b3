//! Client-side template compilation.
//!
//! ```text
//! templates/user/row.jst   ──▶  window.JST['user_row'] = _.template('<li>..</li>');
//! ```

use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

use super::Compressor;
use crate::config::TemplatesConfig;
use crate::utils::path::route;

fn newline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r?\n").unwrap())
}

impl Compressor {
    /// Compile template sources into one script assigning each template to
    /// the configured namespace. Empty when there are no templates.
    pub fn compile_templates(&self, paths: &[String]) -> Result<String> {
        if paths.is_empty() {
            return Ok(String::new());
        }

        let TemplatesConfig {
            namespace, func, ..
        } = &self.templates;
        let base = base_path(paths);

        let mut out = format!("{namespace} = {namespace} || {{}};\n");
        for path in paths {
            let contents = self.storage.read_text(path)?;
            let name = template_name(path, &base, &self.templates);
            out.push_str(&format!(
                "{namespace}['{name}'] = {func}('{}');\n",
                escape(&contents)
            ));
        }
        Ok(out)
    }
}

fn escape(contents: &str) -> String {
    newline_re()
        .replace_all(contents, "\\n")
        .replace('\'', "\\'")
}

/// Longest run of leading path segments shared by every path.
fn base_path(paths: &[String]) -> String {
    let split: Vec<Vec<&str>> = paths.iter().map(|p| p.split('/').collect()).collect();
    let Some(first) = split.first() else {
        return String::new();
    };

    let common = (0..first.len())
        .take_while(|&i| split.iter().all(|segs| segs.get(i) == Some(&first[i])))
        .count();
    first[..common].join("/")
}

/// Template name: path below `base` without the extension, with `/`
/// replaced by the separator.
fn template_name(path: &str, base: &str, config: &TemplatesConfig) -> String {
    let (path, base) = if base.is_empty() {
        (route::basename(path), "")
    } else if path == base {
        (path, route::dirname(path))
    } else {
        (path, base)
    };

    let name = if base.is_empty() {
        path
    } else {
        path.strip_prefix(base)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(path)
    };
    let name = name.strip_suffix(config.ext.as_str()).unwrap_or(name);
    name.replace('/', &config.separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompressConfig;
    use crate::storage::FileSystemStorage;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_base_path() {
        assert_eq!(base_path(&strings(&["t/a/x.jst", "t/a/y.jst"])), "t/a");
        assert_eq!(base_path(&strings(&["t/a/x.jst", "t/b/y.jst"])), "t");
        assert_eq!(base_path(&strings(&["a/x.jst", "b/y.jst"])), "");
        assert_eq!(base_path(&strings(&["t/a/x.jst"])), "t/a/x.jst");
    }

    #[test]
    fn test_template_name() {
        let config = TemplatesConfig::default();
        assert_eq!(template_name("t/user/row.jst", "t", &config), "user_row");
        assert_eq!(template_name("t/row.jst", "t/row.jst", &config), "row");
        assert_eq!(template_name("a/x.jst", "", &config), "x");
    }

    #[test]
    fn test_compile_templates() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("tpl/user")).unwrap();
        fs::write(dir.path().join("tpl/user/row.jst"), "<li class='row'>\r\n<%= name %></li>\n").unwrap();
        fs::write(dir.path().join("tpl/list.jst"), "<ul></ul>").unwrap();
        let storage = Arc::new(FileSystemStorage::new(dir.path(), "/static/"));
        let compressor = Compressor::new(
            storage,
            CompressConfig::default(),
            TemplatesConfig::default(),
            Vec::new(),
        );

        let js = compressor
            .compile_templates(&strings(&["tpl/user/row.jst", "tpl/list.jst"]))
            .unwrap();
        assert_eq!(
            js,
            "window.JST = window.JST || {};\n\
             window.JST['user_row'] = _.template('<li class=\\'row\\'>\\n<%= name %></li>\\n');\n\
             window.JST['list'] = _.template('<ul></ul>');\n"
        );
        assert_eq!(compressor.compile_templates(&[]).unwrap(), "");
    }
}
