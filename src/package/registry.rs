use std::collections::BTreeMap;

use super::{AssetKind, Package, PackageError};
use crate::config::{BaleConfig, PackageConfig};

/// Packages by kind and name, fixed at construction.
#[derive(Debug, Default)]
pub struct PackageRegistry {
    styles: BTreeMap<String, Package>,
    scripts: BTreeMap<String, Package>,
}

impl PackageRegistry {
    pub fn new(
        styles: &BTreeMap<String, PackageConfig>,
        scripts: &BTreeMap<String, PackageConfig>,
    ) -> Self {
        Self {
            styles: Self::table(AssetKind::Style, styles),
            scripts: Self::table(AssetKind::Script, scripts),
        }
    }

    pub fn from_config(config: &BaleConfig) -> Self {
        Self::new(&config.styles, &config.scripts)
    }

    fn table(kind: AssetKind, configs: &BTreeMap<String, PackageConfig>) -> BTreeMap<String, Package> {
        configs
            .iter()
            .map(|(name, config)| (name.clone(), Package::new(name, kind, config.clone())))
            .collect()
    }

    fn packages(&self, kind: AssetKind) -> &BTreeMap<String, Package> {
        match kind {
            AssetKind::Style => &self.styles,
            AssetKind::Script => &self.scripts,
        }
    }

    pub fn get(&self, kind: AssetKind, name: &str) -> Result<&Package, PackageError> {
        self.packages(kind)
            .get(name)
            .ok_or_else(|| PackageError::NotFound {
                kind,
                name: name.to_string(),
            })
    }

    /// Packages of one kind, sorted by name.
    pub fn iter(&self, kind: AssetKind) -> impl Iterator<Item = &Package> {
        self.packages(kind).values()
    }

    pub fn len(&self) -> usize {
        self.styles.len() + self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
