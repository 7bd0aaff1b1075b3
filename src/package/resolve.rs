//! Glob expansion of package source lists.

use rustc_hash::FxHashSet;

use crate::{debug, log};
use crate::storage::Storage;

/// Resolved sources of one package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sources {
    /// Every resolved source, in packing order.
    pub all: Vec<String>,
    /// Sources that go through the compile/compress pipeline.
    pub paths: Vec<String>,
    /// Client-side templates.
    pub templates: Vec<String>,
}

/// Expands glob patterns into existing logical paths.
pub struct PathResolver<'a> {
    storage: &'a dyn Storage,
    template_ext: &'a str,
    excluded: Option<&'a FxHashSet<String>>,
}

impl<'a> PathResolver<'a> {
    pub fn new(storage: &'a dyn Storage, template_ext: &'a str) -> Self {
        Self {
            storage,
            template_ext,
            excluded: None,
        }
    }

    /// Never resolve any of `paths`, such as packed outputs written back
    /// into the tree sources are read from.
    pub fn excluding(mut self, paths: &'a FxHashSet<String>) -> Self {
        self.excluded = Some(paths);
        self
    }

    /// Resolve patterns in order, keeping the first occurrence of each path.
    ///
    /// A pattern that matches nothing contributes nothing. A pattern that
    /// fails to parse is reported and skipped.
    pub fn resolve(&self, patterns: &[String]) -> Sources {
        let mut seen = FxHashSet::default();
        let mut sources = Sources::default();

        for pattern in patterns {
            let matches = match self.storage.glob(pattern) {
                Ok(matches) => matches,
                Err(err) => {
                    log!("resolve"; "skipping `{}`: {}", pattern, err);
                    continue;
                }
            };

            for path in matches {
                if self.excluded.is_some_and(|excluded| excluded.contains(&path)) {
                    debug!("resolve"; "skipping packed output {}", path);
                    continue;
                }
                if self.storage.find(&path).is_none() || !seen.insert(path.clone()) {
                    continue;
                }
                if self.is_template(&path) {
                    sources.templates.push(path.clone());
                } else {
                    sources.paths.push(path.clone());
                }
                sources.all.push(path);
            }
        }

        sources
    }

    fn is_template(&self, path: &str) -> bool {
        !self.template_ext.is_empty() && path.ends_with(self.template_ext)
    }
}
