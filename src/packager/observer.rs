//! Completion notifications.

use crate::compressor::CompressOptions;
use crate::package::{AssetKind, Package};

/// Fired after a package's artifacts are written.
#[derive(Debug, Clone, Copy)]
pub enum PackEvent<'a> {
    StylePacked {
        package: &'a Package,
        options: &'a CompressOptions,
    },
    ScriptPacked {
        package: &'a Package,
        options: &'a CompressOptions,
    },
}

impl<'a> PackEvent<'a> {
    pub fn new(package: &'a Package, options: &'a CompressOptions) -> Self {
        match package.kind() {
            AssetKind::Style => Self::StylePacked { package, options },
            AssetKind::Script => Self::ScriptPacked { package, options },
        }
    }

    pub fn package(&self) -> &'a Package {
        match self {
            Self::StylePacked { package, .. } | Self::ScriptPacked { package, .. } => package,
        }
    }

    pub fn options(&self) -> &'a CompressOptions {
        match self {
            Self::StylePacked { options, .. } | Self::ScriptPacked { options, .. } => options,
        }
    }
}

/// Subscriber to pack events. Return values are not consulted.
pub trait PackObserver {
    fn notify(&self, event: &PackEvent<'_>);
}

impl<F> PackObserver for F
where
    F: Fn(&PackEvent<'_>),
{
    fn notify(&self, event: &PackEvent<'_>) {
        self(event)
    }
}
