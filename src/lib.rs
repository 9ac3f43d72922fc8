//! Shared library for the tpp-caps introspection tool.
//!
//! The crate exposes the four stages the `tpp-caps` binary drives in order:
//! locating the `tpp-providers` root, discovering each provider's init file,
//! scraping the capabilities it registers, and rendering the summary table.
//! Each stage returns its result to the caller; nothing is accumulated in
//! process-wide state.

use std::env;

pub mod discovery;
pub mod extract;
pub mod locator;
pub mod logging;
pub mod report;

pub use discovery::ProviderEntry;
pub use extract::ProviderCapabilities;
pub use report::CapabilityTable;

/// Directory name that marks the providers tree.
pub const PROVIDERS_DIR: &str = "tpp-providers";

/// Fallback init file name used when a provider has no `<provider>.go`.
pub const SEARCH_INIT_FILE: &str = "search_init.go";

/// Read an environment variable, treating an empty value as unset.
pub fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
