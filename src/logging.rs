//! Log stream setup.
//!
//! Everything the tool prints (diagnostics, usage text, and the report table)
//! goes through `tracing` to stderr. The filter comes from `TPP_CAPS_LOG` and
//! only governs diagnostics: events on [`REPORT_TARGET`] are always enabled.

use crate::env_non_empty;
use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TPP_CAPS_LOG";
const DEFAULT_FILTER: &str = "info";

/// Target for the report table and usage text.
pub const REPORT_TARGET: &str = "tpp_caps::report";

/// Filter directive from `TPP_CAPS_LOG`, or `info` when unset.
pub fn filter_directive() -> String {
    env_non_empty(LOG_ENV).unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Build the filter for `directive`, keeping [`REPORT_TARGET`] at `info`.
///
/// A directive that fails to parse falls back to `info` rather than aborting
/// the run.
pub fn build_filter(directive: &str) -> Result<EnvFilter> {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    Ok(filter.add_directive(format!("{REPORT_TARGET}=info").parse()?))
}

/// Install the stderr subscriber.
pub fn init() -> Result<()> {
    let filter = build_filter(&filter_directive())?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_target_survives_restrictive_filters() {
        for directive in ["error", "off", "warn,tpp_caps=error", "not a directive ==="] {
            let filter = build_filter(directive).expect("filter builds");
            assert!(
                filter.to_string().to_lowercase().contains("tpp_caps::report=info"),
                "{directive}: {filter}"
            );
        }
    }
}
