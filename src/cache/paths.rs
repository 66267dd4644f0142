// Cache path utilities.
// Maps store keys onto files under the platform cache directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/folio on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path of the file backing a store key.
///
/// Keys are hex-encoded, so distinct keys never share a file and no key can
/// leave `root`.
pub fn key_path(root: &Path, key: &str) -> PathBuf {
    root.join(format!("{}.json", hex::encode(key)))
}
