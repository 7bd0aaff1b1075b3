//! Placeholder variables for compiler commands.

use rustc_hash::FxHashMap;
use std::path::Path;

pub const INPUT_VAR: &str = "BALE_INPUT";
pub const OUTPUT_VAR: &str = "BALE_OUTPUT";

/// Build `$BALE_*` variables for one compiler invocation.
pub fn build_vars(infile: &Path, outfile: &Path) -> FxHashMap<String, String> {
    let mut vars = FxHashMap::default();
    vars.insert(INPUT_VAR.into(), infile.display().to_string());
    vars.insert(OUTPUT_VAR.into(), outfile.display().to_string());
    vars
}

/// Replace `$BALE_*` placeholders in command arguments.
pub fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in vars {
                result = result.replace(&format!("${key}"), value);
            }
            result
        })
        .collect()
}
