use crate::analysis::{ClassifiedComponent, ManifestReport, NumberedPermission, Priority};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

/// JSON reporter for programmatic output
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &ManifestReport) -> Result<String> {
        let json =
            serde_json::to_string_pretty(&JsonReport::from_report(report)).into_diagnostic()?;
        Ok(json + "\n")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    permissions: &'a [NumberedPermission],
    activities: &'a [ClassifiedComponent],
    services: &'a [ClassifiedComponent],
    receivers: &'a [ClassifiedComponent],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    permissions: usize,
    critical_permissions: usize,
    components: usize,
    exported: usize,
    with_entry_points: usize,
}

impl<'a> JsonReport<'a> {
    fn from_report(report: &'a ManifestReport) -> Self {
        let components = || {
            report
                .activities
                .iter()
                .chain(&report.services)
                .chain(&report.receivers)
        };

        Self {
            version: env!("CARGO_PKG_VERSION"),
            permissions: report.permissions.entries(),
            activities: &report.activities,
            services: &report.services,
            receivers: &report.receivers,
            summary: JsonSummary {
                permissions: report.permissions.len(),
                critical_permissions: report.permissions.critical().count(),
                components: components().count(),
                exported: components().filter(|c| c.exported).count(),
                with_entry_points: components()
                    .filter(|c| c.priority == Priority::HasEntryPoints)
                    .count(),
            },
        }
    }
}
