//! manifest-triage - Attack surface triage for AndroidManifest.xml
//!
//! Reads a manifest and reports which permissions are sensitive, which
//! components are exported and which declare intent filters.
//!
//! # Architecture
//!
//! Data flows one way through the pipeline:
//! 1. **Loading** - Parse the manifest into an element tree
//! 2. **Extraction** - Collect permissions, activities, services and receivers
//! 3. **Classification** - Split permissions by sensitivity, assign component priorities
//! 4. **Reporting** - Render the classified data as text or JSON

pub mod analysis;
pub mod config;
pub mod manifest;
pub mod report;

pub use analysis::{Classifier, Component, ComponentKind, Extractor, ManifestReport, Priority};
pub use config::Config;
pub use manifest::{ManifestError, ManifestLoader, ManifestTree};
pub use report::{ReportFormat, Reporter};

use std::path::Path;

/// Load, extract and classify the manifest at `path`
pub fn analyze(path: &Path) -> Result<ManifestReport, ManifestError> {
    let tree = ManifestLoader::new().load(path)?;
    let data = Extractor::new().extract(&tree);
    Ok(Classifier::new().classify(data))
}
