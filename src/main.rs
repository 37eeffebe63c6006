use clap::Parser;
use manifest_triage::{analyze, Config, ReportFormat, Reporter};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// manifest-triage - Attack surface triage for AndroidManifest.xml
#[derive(Parser, Debug)]
#[command(name = "manifest-triage")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the AndroidManifest.xml file
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (instead of stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            // Usage errors exit with 1 rather than clap's default of 2
            e.print().into_diagnostic()?;
            return Ok(ExitCode::FAILURE);
        }
    };

    init_logging(cli.verbose, cli.quiet);
    info!("manifest-triage v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    let report = match analyze(&cli.manifest) {
        Ok(report) => report,
        Err(e) => {
            debug!("{}", e.detail());
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let format = match cli.format {
        Some(format) => format.into(),
        None => ReportFormat::from_name(&config.report.format).ok_or_else(|| {
            miette::miette!("Unknown report format in config: {}", config.report.format)
        })?,
    };

    let color = config.report.color && !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }

    Reporter::new(format, cli.output.clone())
        .with_color(color)
        .with_column_widths(config.report.column_widths)
        .report(&report)?;

    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(config_path) = &cli.config {
        return Config::from_file(config_path);
    }

    // Look beside the manifest
    let dir = cli
        .manifest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Config::from_default_locations(dir)
}
