//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Physical path normalization (`normalize_path`, `clean_path`, `relative_to`)
//! - [`route`]: `/`-separated logical paths and URLs (`normpath`, `relpath`, `relative_url`)

pub mod fs;
pub mod route;

// Re-export commonly used functions from fs (used in many places)
pub use fs::{clean_path, normalize_path, relative_to, to_slash};
