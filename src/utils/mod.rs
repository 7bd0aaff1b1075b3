//! Utility modules shared by the packaging stages.

pub mod exec;
pub mod path;
