//! Two-column summary table of provider capabilities.

use crate::extract::ProviderCapabilities;
use std::fmt;
use tabled::builder::Builder;
use tabled::settings::{Panel, Style};

pub const REPORT_TITLE: &str = "Provider capabilities";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A titled table with a provider column and a capability column.
pub struct CapabilityTable {
    title: String,
    rows: Vec<(String, String)>,
}

impl CapabilityTable {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, provider: impl Into<String>, capability: impl Into<String>) {
        self.rows.push((provider.into(), capability.into()));
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    /// Render as an ASCII grid with the title spanning both columns.
    pub fn render(&self) -> String {
        let mut builder = Builder::default();
        for (provider, capability) in &self.rows {
            builder.push_record([provider.clone(), capability.clone()]);
        }
        let mut table = builder.build();
        table
            .with(Style::ascii())
            .with(Panel::header(self.title.clone()));
        table.to_string()
    }
}

impl fmt::Display for CapabilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Lay out the report: provider name on its first row only, then one blank
/// separator row after each provider.
pub fn build_report(providers: &[ProviderCapabilities]) -> CapabilityTable {
    let mut table = CapabilityTable::new(REPORT_TITLE);
    for entry in providers {
        for (idx, capability) in entry.capabilities.iter().enumerate() {
            let provider = if idx == 0 { entry.provider.as_str() } else { "" };
            table.add_row(provider, capability.as_str());
        }
        table.add_row("", "");
    }
    table
}
