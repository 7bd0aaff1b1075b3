//! Asset kind definitions.

use std::fmt;

/// Kind of packed asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum AssetKind {
    /// Stylesheet package from a `[style.*]` table.
    Style,
    /// Script package from a `[script.*]` table.
    Script,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Style, AssetKind::Script];

    /// Name of the configuration table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
