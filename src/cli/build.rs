//! `bale build`: pack selected packages.
//!
//! Packages are packed one after another; the first failure aborts the
//! whole batch.

use anyhow::Result;

use super::{BuildArgs, packager, select_packages};
use crate::config::BaleConfig;
use crate::log;
use crate::packager::PackEvent;

/// Pack the packages selected by `args`, returning every written path.
pub fn build_packages(config: &BaleConfig, args: &BuildArgs) -> Result<Vec<String>> {
    let mut packager = packager(config);
    packager.subscribe(|event: &PackEvent<'_>| {
        let package = event.package();
        log!("pack"; "{} `{}` -> {}", package.kind(), package.name(), event.options().output_filename);
    });

    let packages = select_packages(&packager, args.kind, &args.names)?;
    if packages.is_empty() {
        log!("pack"; "nothing to pack");
        return Ok(Vec::new());
    }

    let mut written = Vec::new();
    for package in &packages {
        written.extend(packager.pack(package)?);
    }

    let count = packages.len();
    log!("pack"; "packed {} package{}", count, if count == 1 { "" } else { "s" });
    Ok(written)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    fn project(extra: &str) -> (TempDir, BaleConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("static");
        fs::create_dir_all(root.join("css")).unwrap();
        fs::create_dir_all(root.join("js")).unwrap();
        fs::write(root.join("css/a.css"), "a {}").unwrap();
        fs::write(root.join("js/a.js"), "var a;").unwrap();
        let config_path = dir.path().join("bale.toml");
        fs::write(&config_path, "").unwrap();

        let mut config = test_parse_config(&format!(
            r#"
[compress]
disable_wrapper = true

[style.main]
source_filenames = ["css/*.css"]
output_filename = "out/main.css"

[script.main]
source_filenames = ["js/*.js"]
output_filename = "out/main.js"
{extra}
"#
        ));
        config.finalize(&config_path);
        (dir, config)
    }

    fn args(names: &[&str]) -> BuildArgs {
        BuildArgs {
            names: names.iter().map(|s| s.to_string()).collect(),
            kind: None,
            source_maps: None,
            verbose: false,
        }
    }

    #[test]
    fn test_build_all() {
        let (_dir, config) = project("");
        let written = build_packages(&config, &args(&[])).unwrap();
        assert_eq!(written, vec!["out/main.css", "out/main.js"]);

        let root = &config.storage.root;
        assert_eq!(fs::read_to_string(root.join("out/main.css")).unwrap(), "a {}");
        assert_eq!(fs::read_to_string(root.join("out/main.js")).unwrap(), "var a;");
    }

    #[test]
    fn test_failure_aborts_batch() {
        let (_dir, config) = project(
            r#"
[[compilers]]
extensions = ["css"]
output_extension = "out.css"
command = ["false"]
"#,
        );
        let mut args = args(&[]);
        args.kind = Some(crate::package::AssetKind::Style);
        assert!(build_packages(&config, &args).is_err());
        assert!(!config.storage.root.join("out/main.css").exists());
    }

    #[test]
    fn test_unknown_name() {
        let (_dir, config) = project("");
        assert!(build_packages(&config, &args(&["missing"])).is_err());
    }
}
