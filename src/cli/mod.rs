//! Command-line interface module.

mod args;
pub mod build;
pub mod list;
pub mod templates;

pub use args::{BuildArgs, Cli, Commands};

use anyhow::Result;
use std::sync::Arc;

use crate::config::BaleConfig;
use crate::package::{AssetKind, Package, PackageError};
use crate::packager::Packager;
use crate::storage::FileSystemStorage;

/// Packager over the configured storage.
pub fn packager(config: &BaleConfig) -> Packager {
    let storage = Arc::new(FileSystemStorage::from_config(&config.storage));
    Packager::new(storage, config)
}

/// Packages selected by kind and name, in kind then name order.
///
/// Every name must match a package of at least one selected kind.
pub fn select_packages<'a>(
    packager: &'a Packager,
    kind: Option<AssetKind>,
    names: &[String],
) -> Result<Vec<&'a Package>> {
    let kinds: Vec<AssetKind> = match kind {
        Some(kind) => vec![kind],
        None => AssetKind::ALL.to_vec(),
    };
    let registry = packager.registry();

    if names.is_empty() {
        return Ok(kinds.iter().flat_map(|&k| registry.iter(k)).collect());
    }

    let mut selected = Vec::new();
    for name in names {
        let found: Vec<_> = kinds
            .iter()
            .filter_map(|&k| packager.package_for(k, name).ok())
            .collect();
        if found.is_empty() {
            return Err(PackageError::NotFound {
                kind: kinds[0],
                name: name.clone(),
            }
            .into());
        }
        selected.extend(found);
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn config() -> BaleConfig {
        test_parse_config(
            r#"
[style.app]
output_filename = "app.css"

[style.print]
output_filename = "print.css"

[script.app]
output_filename = "app.js"
"#,
        )
    }

    fn names(packages: &[&Package]) -> Vec<String> {
        packages
            .iter()
            .map(|p| format!("{}.{}", p.kind(), p.name()))
            .collect()
    }

    #[test]
    fn test_select_all() {
        let config = config();
        let packager = packager(&config);
        let all = select_packages(&packager, None, &[]).unwrap();
        assert_eq!(names(&all), vec!["style.app", "style.print", "script.app"]);

        let scripts = select_packages(&packager, Some(AssetKind::Script), &[]).unwrap();
        assert_eq!(names(&scripts), vec!["script.app"]);
    }

    #[test]
    fn test_select_by_name() {
        let config = config();
        let packager = packager(&config);
        let app = select_packages(&packager, None, &["app".into()]).unwrap();
        assert_eq!(names(&app), vec!["style.app", "script.app"]);

        let err = select_packages(&packager, Some(AssetKind::Script), &["print".into()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackageError>(),
            Some(PackageError::NotFound { kind: AssetKind::Script, .. })
        ));
    }
}
