//! `bale templates`: print the compiled templates of a script package.

use anyhow::Result;

use super::packager;
use crate::config::BaleConfig;
use crate::log;
use crate::package::AssetKind;
use crate::packager::Packager;

pub fn print_templates(config: &BaleConfig, name: &str) -> Result<()> {
    let packager = packager(config);
    let compiled = render(&packager, name)?;
    if compiled.is_empty() {
        log!("templates"; "script package `{}` has no templates", name);
    } else {
        print!("{compiled}");
    }
    Ok(())
}

fn render(packager: &Packager, name: &str) -> Result<String> {
    let package = packager.package_for(AssetKind::Script, name)?;
    packager.pack_templates(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::package::PackageError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_templates() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("static");
        fs::create_dir_all(root.join("tpl/admin")).unwrap();
        fs::write(root.join("tpl/row.jst"), "<li>'x'</li>").unwrap();
        fs::write(root.join("tpl/admin/panel.jst"), "<div>\n</div>").unwrap();
        let config_path = dir.path().join("bale.toml");
        fs::write(&config_path, "").unwrap();

        let mut config = test_parse_config(
            r#"
[script.app]
source_filenames = ["tpl/**/*.jst"]
output_filename = "out/app.js"

[style.app]
source_filenames = ["tpl/*.jst"]
output_filename = "out/app.css"
"#,
        );
        config.finalize(&config_path);
        let packager = packager(&config);

        let out = render(&packager, "app").unwrap();
        assert!(out.starts_with("window.JST = window.JST || {};\n"));
        assert!(out.contains("window.JST['row'] = _.template('<li>\\'x\\'</li>');\n"));
        assert!(out.contains("window.JST['admin_panel'] = _.template('<div>\\n</div>');\n"));

        let err = render(&packager, "missing").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackageError>(),
            Some(PackageError::NotFound { kind: AssetKind::Script, .. })
        ));
    }
}
