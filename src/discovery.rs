//! Finds the init file of every provider below a `tpp-providers` root.
//!
//! A provider is a directory directly under `tpp-providers`; its init file is
//! either `<provider>.go` or `search_init.go`. Matching works on path segments
//! so the root may itself be `tpp-providers` or any ancestor of it.

use crate::{PROVIDERS_DIR, SEARCH_INIT_FILE};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A provider directory name and the init file that registers its capabilities.
pub struct ProviderEntry {
    pub name: String,
    pub init_path: PathBuf,
}

impl ProviderEntry {
    /// Match a walked path against `.../tpp-providers/<provider>/<init file>`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let segments: Vec<String> = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        for (idx, segment) in segments.iter().enumerate() {
            if segment != PROVIDERS_DIR || segments.len() != idx + 3 {
                continue;
            }
            let provider = &segments[idx + 1];
            let file = &segments[idx + 2];
            if *file == format!("{provider}.go") || file == SEARCH_INIT_FILE {
                return Some(Self {
                    name: provider.clone(),
                    init_path: path.to_path_buf(),
                });
            }
        }
        None
    }
}

/// Walk `root` and map each provider name to its init file.
///
/// Entries are visited in file-name order and a later match for the same
/// provider replaces an earlier one. Walk errors are logged and skipped.
pub fn discover_providers(root: &Path) -> BTreeMap<String, PathBuf> {
    let mut providers = BTreeMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable path");
                continue;
            }
        };
        if let Some(found) = ProviderEntry::from_path(entry.path()) {
            providers.insert(found.name, found.init_path);
        }
    }
    providers
}
