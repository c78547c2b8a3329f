//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use neighbortip_domain::{truncate_address, Fid, Neighbor};
use neighbortip_sdk::{Connector, SweepState, TipOutcome, WalletStatus};
use serde_json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the neighbors found by a sweep.
    pub fn format_neighbors(&self, neighbors: &[Neighbor], center: Option<Fid>) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_neighbors_json(neighbors, center),
            OutputFormat::Table => self.format_neighbors_table(neighbors, center),
            OutputFormat::Quiet => self.format_neighbors_quiet(neighbors),
        }
    }

    /// Format the outcome of a finished sweep: the neighbor list plus its message.
    pub fn format_sweep(&self, state: &SweepState) -> Result<String> {
        if self.format == OutputFormat::Json {
            let json = serde_json::json!({
                "center": state.center,
                "neighbors": state.neighbors,
                "message": state.error,
            });
            return Ok(serde_json::to_string_pretty(&json)?);
        }

        let mut out = String::new();
        if !state.neighbors.is_empty() {
            out.push_str(&self.format_neighbors(&state.neighbors, state.center)?);
        }
        if let Some(message) = &state.error {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&self.warning(message));
        }
        Ok(out)
    }

    fn format_neighbors_json(&self, neighbors: &[Neighbor], center: Option<Fid>) -> Result<String> {
        let json = serde_json::json!({
            "center": center,
            "neighbors": neighbors,
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_neighbors_table(&self, neighbors: &[Neighbor], center: Option<Fid>) -> Result<String> {
        if neighbors.is_empty() {
            return Ok(self.colorize("No neighbors found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["FID", "Name", "Owner", ""]);

        for neighbor in neighbors {
            let marker = if Some(neighbor.fid) == center {
                "center"
            } else {
                "tippable"
            };
            builder.push_record([
                neighbor.fid.to_string(),
                neighbor.name.clone().unwrap_or_else(|| "-".to_string()),
                truncate_address(&neighbor.owner),
                marker.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// Quiet mode prints one `fid owner` pair per line.
    fn format_neighbors_quiet(&self, neighbors: &[Neighbor]) -> Result<String> {
        let lines: Vec<String> = neighbors
            .iter()
            .map(|n| format!("{} {}", n.fid, n.owner))
            .collect();
        Ok(lines.join("\n"))
    }

    /// Format the configured wallet connectors.
    pub fn format_connectors(&self, connectors: &[Connector], active: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(connectors)?),
            OutputFormat::Quiet => Ok(connectors
                .iter()
                .map(|c| c.name.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if connectors.is_empty() {
                    return Ok(self.colorize("No connectors configured.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Name", "RPC URL", ""]);
                for connector in connectors {
                    let marker = if connector.name == active { "*" } else { "" };
                    builder.push_record([connector.name.as_str(), connector.rpc_url.as_str(), marker]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Progress line shown while a sweep runs.
    pub fn progress_line(&self, state: &SweepState) -> String {
        let center = state
            .center
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());
        self.colorize(
            &format!(
                "Sweeping around FID {}... {}/{}",
                center, state.progress, state.total
            ),
            "cyan",
        )
    }

    /// Format a wallet status.
    pub fn wallet_status(&self, status: &WalletStatus) -> String {
        match status {
            WalletStatus::Connected { .. } => self.success(&status.to_string()),
            WalletStatus::Error(_) => self.error(&status.to_string()),
            _ => self.info(&status.to_string()),
        }
    }

    /// Format the outcome of a confirmed tip.
    pub fn tip_outcome(&self, outcome: &TipOutcome) -> String {
        match outcome {
            TipOutcome::Sent { tx_hash } => self.success(&format!("Transaction sent: {}", tx_hash)),
            TipOutcome::Failed(message) => self.error(&format!("Transaction failed: {}", message)),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
