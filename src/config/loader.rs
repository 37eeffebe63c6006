use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Configuration for manifest-triage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,

    /// Colorize terminal output
    pub color: bool,

    /// Wrapping widths of the Tipo, Nome and Exported columns
    pub column_widths: [usize; 3],
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            color: true,
            column_widths: [20, 70, 10],
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Self = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config")?,
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config")?,
            _ => match serde_yaml::from_str(&contents) {
                Ok(config) => config,
                Err(_) => toml::from_str(&contents)
                    .into_diagnostic()
                    .wrap_err("Failed to parse config file")?,
            },
        };

        debug!("Loaded config from {}", path.display());
        Ok(config.normalized())
    }

    /// Look for a config file in `dir`, falling back to defaults
    pub fn from_default_locations(dir: &Path) -> Result<Self> {
        let default_names = [
            ".manifest-triage.yml",
            ".manifest-triage.yaml",
            ".manifest-triage.toml",
            "manifest-triage.yml",
            "manifest-triage.yaml",
            "manifest-triage.toml",
        ];

        for name in &default_names {
            let path = dir.join(name);
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    fn normalized(mut self) -> Self {
        self.report.column_widths = self.report.column_widths.map(|w| w.max(1));
        self
    }
}
