#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Command for the compiled `tpp-caps` binary with a predictable environment.
///
/// `GOPATH` and `HOME` point at `gopath` so auto-discovery never wanders into
/// the developer's real trees.
pub fn tpp_caps(gopath: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tpp-caps"));
    cmd.env("GOPATH", gopath)
        .env("HOME", gopath)
        .env_remove("TPP_CAPS_LOG");
    cmd
}

pub struct RunResult {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_command(mut cmd: Command) -> Result<RunResult> {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    Ok(RunResult {
        code: status.code(),
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
}

pub const ACME_INIT: &str = r#"package acme

import "example.com/engine"

func init() {
	p := engine.Register("acme")
	p.HotelAv.AddCapabilities(engine.CapAvFoo, engine.CapAvBar)
	p.RegionAv.AddCapabilities(
		engine.CapAvFoo,
		engine.CapAvQux,
	)
}
"#;

pub const BETA_INIT: &str = r#"package beta

func init() {
	p.RegionAv.AddCapabilities(engine.CapAvBaz)
}
"#;

pub const BARE_INIT: &str = "package bare\n\nfunc init() {}\n";

/// Populate a providers tree with a hotel+region provider, a region-only
/// provider using `search_init.go`, and a provider with no registrations.
pub fn write_fixture_providers(providers_root: &Path) -> Result<()> {
    write_file(providers_root, "acme/acme.go", ACME_INIT)?;
    write_file(providers_root, "acme/helpers.go", "package acme\n")?;
    write_file(providers_root, "beta/search_init.go", BETA_INIT)?;
    write_file(providers_root, "bare/bare.go", BARE_INIT)?;
    Ok(())
}

/// Trimmed cell text of every table line in `log`; border rules are skipped.
pub fn table_rows(log: &str) -> Vec<Vec<String>> {
    log.lines()
        .filter(|line| line.starts_with('|'))
        .map(|line| {
            line.trim_matches('|')
                .split('|')
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .collect()
}

pub fn row(provider: &str, capability: &str) -> Vec<String> {
    vec![provider.to_string(), capability.to_string()]
}
