//! Source-map helpers.
//!
//! - [`comment`]: find, strip and emit `sourceMappingURL` comments
//! - [`SourceMapRelocator`]: rewrite map sources into URLs relative to the
//!   packed file

pub mod comment;
mod relocate;

pub use relocate::SourceMapRelocator;

/// Logical path of the map written next to `output_filename`.
pub fn map_filename(output_filename: &str) -> String {
    format!("{output_filename}.map")
}
