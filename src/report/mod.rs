mod json;
mod table;
mod terminal;

pub use json::JsonReporter;
pub use table::Grid;
pub use terminal::{TerminalReporter, NO_COMPONENTS, NO_PERMISSIONS};

use crate::analysis::ManifestReport;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::io::Write;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl ReportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "terminal" | "text" => Some(ReportFormat::Terminal),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Reporter for outputting a classified manifest
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    color: bool,
    column_widths: [usize; 3],
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
            color: true,
            column_widths: [20, 70, 10],
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_column_widths(mut self, widths: [usize; 3]) -> Self {
        self.column_widths = widths;
        self
    }

    /// Render the report without writing it anywhere
    pub fn render(&self, report: &ManifestReport) -> Result<String> {
        match self.format {
            ReportFormat::Terminal => Ok(TerminalReporter::new()
                .with_color(self.color)
                .with_column_widths(self.column_widths)
                .render(report)),
            ReportFormat::Json => JsonReporter::new().render(report),
        }
    }

    /// Write the report to the output file, or stdout when none is set
    pub fn report(&self, report: &ManifestReport) -> Result<()> {
        let rendered = self.render(report)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &rendered)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report written to: {}", path.display());
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes()).into_diagnostic()?;
            stdout.flush().into_diagnostic()?;
        }

        Ok(())
    }
}
