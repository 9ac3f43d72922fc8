//! Decides which `tpp-providers` directory a run scans.
//!
//! The root comes either from the single CLI argument or from searching the
//! `GOPATH` roots for a `tpp-providers` directory that sits below a `src`
//! segment. Ambiguity is reported back to the caller instead of guessed at.

use crate::{PROVIDERS_DIR, env_non_empty};
use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SRC_SEGMENT: &str = "src";

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the argument vector asks the tool to do.
pub enum Invocation {
    /// Print usage and exit without scanning.
    Usage,
    /// Scan the given directory.
    Explicit(PathBuf),
    /// Search the `GOPATH` roots for the providers directory.
    AutoDiscover,
}

impl Invocation {
    /// Classify the arguments that follow the program name.
    ///
    /// `help` as the first argument wins over everything else; more than one
    /// argument is also treated as a request for usage.
    pub fn parse<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        if matches!(
            args.first().and_then(|first| first.to_str()),
            Some("help" | "-h" | "--help")
        ) {
            return Invocation::Usage;
        }
        match args.len() {
            0 => Invocation::AutoDiscover,
            1 => Invocation::Explicit(PathBuf::from(&args[0])),
            _ => Invocation::Usage,
        }
    }
}

/// Validate an explicitly requested root.
pub fn resolve_explicit_root(path: &Path) -> Result<PathBuf> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            bail!("directory {} does not exist", path.display())
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Unable to stat {}", path.display()));
        }
    };
    if !meta.is_dir() {
        bail!("{} is not a directory", path.display());
    }
    Ok(path.to_path_buf())
}

/// Module search roots taken from `GOPATH`, defaulting to `$HOME/go`.
pub fn search_roots() -> Vec<PathBuf> {
    roots_from_env(
        env_non_empty("GOPATH").map(OsString::from),
        env_non_empty("HOME").map(OsString::from),
    )
}

fn roots_from_env(gopath: Option<OsString>, home: Option<OsString>) -> Vec<PathBuf> {
    let roots: Vec<PathBuf> = gopath
        .map(|raw| {
            std::env::split_paths(&raw)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default();
    if !roots.is_empty() {
        return roots;
    }
    home.map(|home| vec![PathBuf::from(home).join("go")])
        .unwrap_or_default()
}

/// Walk every root and collect `tpp-providers` directories below a `src` segment.
///
/// Unreadable entries (including roots that do not exist) are logged and
/// skipped so one broken `GOPATH` entry does not hide the others.
pub fn locate_providers_dirs(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for root in roots {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(root = %root.display(), error = %err, "skipping unreadable path");
                    continue;
                }
            };
            if entry.file_type().is_dir()
                && entry.file_name() == PROVIDERS_DIR
                && has_src_segment(entry.path())
            {
                found.push(entry.into_path());
            }
        }
    }
    found
}

fn has_src_segment(path: &Path) -> bool {
    path.components().any(|c| c.as_os_str() == SRC_SEGMENT)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of auto-discovery.
pub enum RootSearch {
    NotFound,
    Ambiguous(Vec<PathBuf>),
    Found(PathBuf),
}

impl RootSearch {
    pub fn from_matches(mut matches: Vec<PathBuf>) -> Self {
        match matches.len() {
            0 => RootSearch::NotFound,
            1 => RootSearch::Found(matches.remove(0)),
            _ => RootSearch::Ambiguous(matches),
        }
    }
}

/// Usage text, one line per entry point.
pub fn usage_lines() -> [&'static str; 2] {
    [
        "usage if $GOPATH is set: tpp-caps",
        "usage if you want manually locate tpp-providers: tpp-caps <tpp-providers path>",
    ]
}
