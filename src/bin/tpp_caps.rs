//! Prints the capabilities each tpp provider registers.
//!
//! Locates the `tpp-providers` tree (explicit argument or `GOPATH` search),
//! finds every provider's init file, scrapes its `AddCapabilities` calls, and
//! logs a single summary table. All output goes to the stderr log stream.

use anyhow::Result;
use std::env;
use tpp_caps::discovery::discover_providers;
use tpp_caps::extract::collect_capabilities;
use tpp_caps::locator::{
    Invocation, RootSearch, locate_providers_dirs, resolve_explicit_root, search_roots,
    usage_lines,
};
use tpp_caps::logging::{self, REPORT_TARGET};
use tpp_caps::report::build_report;

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("{err:#}");
    }
    if let Err(err) = run() {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let root = match Invocation::parse(env::args_os().skip(1)) {
        Invocation::Usage => {
            usage();
            return Ok(());
        }
        Invocation::Explicit(path) => resolve_explicit_root(&path)?,
        Invocation::AutoDiscover => {
            let roots = search_roots();
            tracing::debug!(?roots, "searching module roots");
            match RootSearch::from_matches(locate_providers_dirs(&roots)) {
                RootSearch::Found(path) => path,
                RootSearch::NotFound => {
                    tracing::warn!(
                        "can not find package `tpp-providers` in GOPATH. If it exists, pass its path explicitly"
                    );
                    usage();
                    return Ok(());
                }
                RootSearch::Ambiguous(paths) => {
                    tracing::warn!(
                        "found several `tpp-providers` in GOPATH. Specify the one you are interested in"
                    );
                    for path in &paths {
                        tracing::warn!("  {}", path.display());
                    }
                    usage();
                    return Ok(());
                }
            }
        }
    };

    let providers = discover_providers(&root);
    if providers.is_empty() {
        tracing::debug!(root = %root.display(), "no providers found");
        return Ok(());
    }

    let collected = collect_capabilities(&root, &providers)?;
    let table = build_report(&collected);
    tracing::info!(target: REPORT_TARGET, "\n{table}");
    Ok(())
}

fn usage() {
    for line in usage_lines() {
        tracing::info!(target: REPORT_TARGET, "{line}");
    }
}
