//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use concord_agents::weights_for;
use concord_domain::{DocType, SummaryReport};
use concord_gatekeeper::ValidationResult;
use concord_orchestrator::JobOutcome;
use concord_resolver::default_strategy;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
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

    /// Format the outcome of one job.
    pub fn format_outcome(&self, outcome: &JobOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_outcome_json(outcome),
            OutputFormat::Table => Ok(self.format_outcome_table(outcome)),
            OutputFormat::Quiet => Ok(format!("{}\t{}", outcome.job.id(), outcome.job.status())),
        }
    }

    fn format_outcome_json(&self, outcome: &JobOutcome) -> Result<String> {
        let value = serde_json::json!({
            "job_id": outcome.job.id().to_string(),
            "status": outcome.job.status().to_string(),
            "error": outcome.job.error(),
            "strategy": outcome.strategy.map(|s| s.to_string()),
            "faults": outcome.faults,
            "report": outcome.report,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_outcome_table(&self, outcome: &JobOutcome) -> String {
        let mut out = Vec::new();
        let job = &outcome.job;

        let header = format!("Job {} {}", job.id(), job.status());
        out.push(if outcome.is_done() {
            self.success(&header)
        } else {
            self.error(&header)
        });
        if let Some(error) = job.error() {
            out.push(format!("  {}", error));
        }
        if let Some(strategy) = outcome.strategy {
            out.push(format!("  Strategy: {}", strategy));
        }

        if let Some(report) = &outcome.report {
            out.push(self.documents_table(report));
            if !report.conflicts.is_empty() {
                out.push(self.conflicts_table(report));
            }
            for section in &report.sections {
                out.push(self.colorize(&section.title, "cyan"));
                out.push(section.content.clone());
            }
        }

        for fault in &outcome.faults {
            out.push(self.warning(&fault.to_string()));
        }

        out.join("\n")
    }

    fn documents_table(&self, report: &SummaryReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Document", "Type", "Title", "Credibility"]);

        for doc in &report.documents {
            builder.push_record([
                short_id(&doc.doc_id.to_string()),
                doc.doc_type.to_string(),
                doc.title.clone().unwrap_or_else(|| "-".to_string()),
                format!("{:.2}", doc.credibility_score.overall),
            ]);
        }

        rounded(builder)
    }

    fn conflicts_table(&self, report: &SummaryReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Topic", "Claims", "Resolution", "Confidence"]);

        for conflict in &report.conflicts {
            let resolution = match &conflict.resolution {
                Some(text) => text.clone(),
                None => self.colorize("needs review", "yellow"),
            };
            builder.push_record([
                conflict.topic.clone(),
                conflict.claims.len().to_string(),
                resolution,
                format!("{:.2}", conflict.confidence),
            ]);
        }

        rounded(builder)
    }

    /// Format the validation of one submission file.
    pub fn format_validation(&self, source: &str, result: &ValidationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "file": source,
                    "accepted": result.is_accepted(),
                    "reasons": result.reasons.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
                    "warnings": result.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
                    "admitted": result.admitted,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(format!(
                "{}\t{}",
                source,
                if result.is_accepted() { "accepted" } else { "rejected" }
            )),
            OutputFormat::Table => {
                let mut out = Vec::new();
                if result.is_accepted() {
                    out.push(self.success(&format!(
                        "{}: accepted ({} document(s))",
                        source,
                        result.admitted.len()
                    )));
                } else {
                    out.push(self.error(&format!("{}: rejected", source)));
                }
                for reason in &result.reasons {
                    out.push(format!("  {}", reason));
                }
                for warning in &result.warnings {
                    out.push(self.warning(&warning.to_string()));
                }
                Ok(out.join("\n"))
            }
        }
    }

    /// Format the document type catalogue.
    pub fn format_types(&self) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let types: Vec<serde_json::Value> = DocType::ALL
                    .iter()
                    .map(|doc_type| {
                        let weights: serde_json::Map<String, serde_json::Value> = weights_for(*doc_type)
                            .iter()
                            .map(|(name, weight)| (name.to_string(), serde_json::json!(weight)))
                            .collect();
                        serde_json::json!({
                            "doc_type": doc_type.to_string(),
                            "default_strategy": default_strategy(*doc_type).to_string(),
                            "signals": weights,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&types)?)
            }
            OutputFormat::Quiet => Ok(DocType::ALL
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Type", "Default strategy", "Signals"]);
                for doc_type in DocType::ALL {
                    let signals = weights_for(doc_type)
                        .iter()
                        .map(|(name, weight)| format!("{} {:.2}", name, weight))
                        .collect::<Vec<_>>()
                        .join(", ");
                    builder.push_record([
                        doc_type.to_string(),
                        default_strategy(doc_type).to_string(),
                        signals,
                    ]);
                }
                Ok(rounded(builder))
            }
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

fn rounded(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

// v7 ids of one job share their timestamp prefix; keep the tail.
fn short_id(id: &str) -> String {
    id.chars().rev().take(8).collect::<Vec<_>>().into_iter().rev().collect()
}
