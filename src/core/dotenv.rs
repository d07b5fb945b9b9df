//! Dotenv-style environment files.
//!
//! A `.env` next to the job lets operators keep the AWS and Rancher keys out
//! of the process manager's configuration. Values from the file only fill
//! gaps; the real process environment always wins.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

/// Parse `.env` contents into key/value pairs.
///
/// Skips empty lines and comments, accepts an optional `export ` prefix and
/// trims one layer of surrounding quotes from values. Later keys override
/// earlier ones.
pub fn parse(contents: &str) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();

    for line in contents.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            let value = value.trim().trim_matches('"').trim_matches('\'');
            vars.insert(key.to_string(), value.to_string());
        }
    }

    vars
}

/// Read and parse a `.env` file.
///
/// A missing file yields an empty map. Any other read failure is logged and
/// also yields an empty map, since every value can still come from the
/// process environment.
pub fn read(path: &Path) -> BTreeMap<String, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let vars = parse(&contents);
            debug!(path = %path.display(), count = vars.len(), "loaded env file");
            vars
        }
        Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable env file");
            BTreeMap::new()
        }
    }
}
