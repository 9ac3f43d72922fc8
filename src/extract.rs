//! Scrapes capability registrations out of provider init files.
//!
//! Init files are never parsed as Go. The extractor finds the first
//! `HotelAv.AddCapabilities` and `RegionAv.AddCapabilities` call sites, captures
//! the text between the following parentheses, and splits it on commas. Region
//! capabilities are appended after the hotel ones unless already listed.

use crate::SEARCH_INIT_FILE;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const HOTEL_MARKER: &str = "HotelAv.AddCapabilities";
pub const REGION_MARKER: &str = "RegionAv.AddCapabilities";

const CONSTANT_PREFIX: &str = "engine.Cap";
const AVAILABILITY_PREFIX: &str = "Av";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A provider that made it into the report.
pub struct ProviderCapabilities {
    pub provider: String,
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Byte offsets of the first occurrence of each marker.
pub struct Markers {
    pub hotel: Option<usize>,
    pub region: Option<usize>,
}

impl Markers {
    pub fn is_empty(&self) -> bool {
        self.hotel.is_none() && self.region.is_none()
    }
}

pub fn find_markers(source: &str) -> Markers {
    Markers {
        hotel: source.find(HOTEL_MARKER),
        region: source.find(REGION_MARKER),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of scanning from a marker to its argument list.
pub enum CaptureOutcome {
    /// Text between `(` and the first `)`.
    Closed(String),
    /// The source ended before a `)`; holds whatever was accumulated.
    Unterminated(String),
    /// A `)` showed up before any `(`.
    Malformed,
}

impl CaptureOutcome {
    /// Captured text; empty for a malformed call site.
    pub fn into_text(self) -> String {
        match self {
            CaptureOutcome::Closed(text) | CaptureOutcome::Unterminated(text) => text,
            CaptureOutcome::Malformed => String::new(),
        }
    }
}

#[derive(Clone, Copy)]
enum ScanState {
    Outside,
    Inside,
}

/// Capture the argument list that follows the marker at `start`.
///
/// Opening parentheses are never part of the capture, including nested ones;
/// the first `)` after the opening one ends it.
pub fn capture_arguments(source: &str, start: usize) -> CaptureOutcome {
    let mut state = ScanState::Outside;
    let mut captured = String::new();
    for ch in source[start..].chars() {
        match (state, ch) {
            (_, '(') => state = ScanState::Inside,
            (ScanState::Outside, ')') => return CaptureOutcome::Malformed,
            (ScanState::Outside, _) => {}
            (ScanState::Inside, ')') => return CaptureOutcome::Closed(captured),
            (ScanState::Inside, _) => captured.push(ch),
        }
    }
    CaptureOutcome::Unterminated(captured)
}

/// Split a captured argument list into capability names.
///
/// Each token is trimmed, then loses a leading `engine.Cap` and a leading
/// `Av`. Empty tokens are kept and duplicates are not removed.
pub fn parse_capability_list(captured: &str) -> Vec<String> {
    captured
        .split(',')
        .map(|token| {
            let token = token.trim();
            let token = token.strip_prefix(CONSTANT_PREFIX).unwrap_or(token);
            let token = token.strip_prefix(AVAILABILITY_PREFIX).unwrap_or(token);
            token.to_string()
        })
        .collect()
}

/// Append region capabilities that the hotel list does not already contain.
pub fn merge_capabilities(hotel: Vec<String>, region: Vec<String>) -> Vec<String> {
    let mut combined = hotel;
    for cap in region {
        if !combined.contains(&cap) {
            combined.push(cap);
        }
    }
    combined
}

/// Read an init file, falling back to `<root>/<provider>/search_init.go`.
pub fn read_init_source(root: &Path, provider: &str, init_path: &Path) -> Result<String> {
    let bytes = match fs::read(init_path) {
        Ok(bytes) => bytes,
        Err(primary) => {
            let fallback = root.join(provider).join(SEARCH_INIT_FILE);
            tracing::debug!(
                provider,
                path = %init_path.display(),
                error = %primary,
                "init file unreadable, trying fallback"
            );
            fs::read(&fallback).with_context(|| {
                format!(
                    "Unable to read init file for provider {provider} ({} or {})",
                    init_path.display(),
                    fallback.display()
                )
            })?
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Capabilities declared in one provider's source, or `None` when nothing usable was found.
pub fn extract_capabilities(provider: &str, source: &str) -> Option<Vec<String>> {
    let markers = find_markers(source);
    if markers.is_empty() {
        tracing::warn!(provider, "could not read <{provider}> hotel capabilities");
        return None;
    }

    let capture = |start: Option<usize>| -> Vec<String> {
        let Some(start) = start else {
            return Vec::new();
        };
        let outcome = capture_arguments(source, start);
        if outcome == CaptureOutcome::Malformed {
            tracing::warn!(provider, "unexpected format: {provider}");
        }
        parse_capability_list(&outcome.into_text())
    };

    let combined = merge_capabilities(capture(markers.hotel), capture(markers.region));
    if combined.iter().all(|cap| cap.is_empty()) {
        tracing::warn!(
            provider,
            "could not read <{provider}> hotel capabilities (got string, but no caps parsed)"
        );
        return None;
    }
    Some(combined)
}

/// Read and scrape every discovered provider in name order.
///
/// Providers without usable capabilities are skipped; an init file that cannot
/// be read from either location aborts the whole collection.
pub fn collect_capabilities(
    root: &Path,
    providers: &BTreeMap<String, PathBuf>,
) -> Result<Vec<ProviderCapabilities>> {
    let mut collected = Vec::new();
    for (provider, init_path) in providers {
        let source = read_init_source(root, provider, init_path)?;
        if let Some(capabilities) = extract_capabilities(provider, &source) {
            collected.push(ProviderCapabilities {
                provider: provider.clone(),
                capabilities,
            });
        }
    }
    Ok(collected)
}
