//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Configuration errors, diagnostics, field paths |

mod error;

pub use error::{ConfigDiagnostics, ConfigError, FieldPath};
