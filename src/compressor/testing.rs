//! Fixtures for compressor tests: a storage tree and fake compressors.
//!
//! Fake compressors are `sh` scripts run through `sh <script>` so that the
//! freshly written file never has to be executed directly.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::Compressor;
use crate::config::{CompressConfig, TemplatesConfig};
use crate::storage::{FileSystemStorage, Storage};

/// Writes the packed file and `<output>.map` like cleancss. The map lists
/// absolute source paths, plus `$FAKE_EXTRA` when set, and records the
/// arguments it was called with.
const FAKE_CLEANCSS: &str = r#"
out=""
srcs=""
args=""
for a in "$@"; do args="$args${args:+,}\"$a\""; done
while [ $# -gt 0 ]; do
  case "$1" in
    --output) out="$2"; shift 2 ;;
    --*) shift ;;
    *) srcs="$srcs $1"; shift ;;
  esac
done
: > "$out"
json=""
for s in $srcs; do
  cat "$s" >> "$out"
  echo >> "$out"
  json="$json${json:+,}\"$s\""
done
if [ -n "$FAKE_EXTRA" ]; then json="$json${json:+,}\"$FAKE_EXTRA\""; fi
printf '/*# sourceMappingURL=%s.map */\n' "$(basename "$out")" >> "$out"
printf '{"version":3,"sources":[%s],"names":[],"mappings":"AAAA","args":[%s]}' "$json" "$args" > "$out.map"
"#;

/// Prints the concatenated `--js` inputs like closure and writes the map to
/// `--create_source_map`. Map sources are the mapped URLs; chained input
/// maps are listed under `inputs`. Without a map to create it copies stdin.
const FAKE_CLOSURE: &str = r#"
map=""
js=""
sources=""
inputs=""
while [ $# -gt 0 ]; do
  case "$1" in
    --source_map_location_mapping) sources="$sources${sources:+,}\"${2#*|}\""; shift 2 ;;
    --source_map_input) inputs="$inputs${inputs:+,}\"${2#*|}\""; shift 2 ;;
    --create_source_map) map="$2"; shift 2 ;;
    --js) js="$js $2"; shift 2 ;;
    *) shift ;;
  esac
done
if [ -z "$map" ]; then cat; exit 0; fi
for f in $js; do cat "$f"; echo; done
printf '//# sourceMappingURL=closure.map\n'
printf '{"version":3,"sources":[%s],"inputs":[%s],"mappings":"AAAA"}' "$sources" "$inputs" > "$map"
"#;

pub struct Fixture {
    _dir: TempDir,
    pub root: PathBuf,
    pub bin: PathBuf,
    pub storage: Arc<FileSystemStorage>,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("static");
        let bin = dir.path().join("bin");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&bin).unwrap();
        let storage = Arc::new(FileSystemStorage::new(&root, "/static/"));
        Self {
            root: storage.base_location().to_path_buf(),
            bin,
            storage,
            _dir: dir,
        }
    }

    /// Write a source under the storage root.
    pub fn write(&self, path: &str, content: &str) {
        let full = self.root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.root.join(path)).unwrap()
    }

    /// Write a shell script and return the command running it.
    pub fn script(&self, name: &str, body: &str) -> Vec<String> {
        let path = self.bin.join(name);
        fs::write(&path, body).unwrap();
        vec!["sh".into(), path.display().to_string()]
    }

    pub fn compressor(&self, configure: impl FnOnce(&mut CompressConfig)) -> Compressor {
        let mut config = CompressConfig::default();
        configure(&mut config);
        Compressor::new(
            self.storage.clone(),
            config,
            TemplatesConfig::default(),
            Vec::new(),
        )
    }
}

pub fn fake_cleancss(fx: &Fixture) -> Vec<String> {
    fx.script("cleancss.sh", FAKE_CLEANCSS)
}

pub fn fake_closure(fx: &Fixture) -> Vec<String> {
    fx.script("closure.sh", FAKE_CLOSURE)
}

pub fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
