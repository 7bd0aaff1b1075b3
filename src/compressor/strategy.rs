use crate::config::{CompressorConfig, Variant};

/// How one package is compressed, chosen once per pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Concatenate and pipe through the compressor; no map.
    Plain,
    /// Hand the compressor discrete files and collect a source map.
    WithSourceMap,
}

impl Strategy {
    /// A package variant overrides the global switch. A map is only produced
    /// when a compressor is configured and there is something to map.
    pub fn select(
        source_maps: bool,
        variant: Option<Variant>,
        compressor: &CompressorConfig,
        has_paths: bool,
    ) -> Self {
        let wanted = match variant {
            Some(Variant::SourceMaps) => true,
            Some(Variant::Plain) => false,
            None => source_maps,
        };
        if wanted && compressor.is_enabled() && has_paths {
            Self::WithSourceMap
        } else {
            Self::Plain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> CompressorConfig {
        CompressorConfig {
            command: vec!["cleancss".into()],
            arguments: Vec::new(),
        }
    }

    #[test]
    fn test_variant_overrides_switch() {
        let c = enabled();
        assert_eq!(Strategy::select(false, None, &c, true), Strategy::Plain);
        assert_eq!(Strategy::select(true, None, &c, true), Strategy::WithSourceMap);
        assert_eq!(
            Strategy::select(false, Some(Variant::SourceMaps), &c, true),
            Strategy::WithSourceMap
        );
        assert_eq!(Strategy::select(true, Some(Variant::Plain), &c, true), Strategy::Plain);
    }

    #[test]
    fn test_no_map_without_compressor_or_paths() {
        let disabled = CompressorConfig::default();
        assert_eq!(Strategy::select(true, None, &disabled, true), Strategy::Plain);
        assert_eq!(Strategy::select(true, None, &enabled(), false), Strategy::Plain);
    }
}
