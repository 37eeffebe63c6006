//! Loading of AndroidManifest.xml documents into an element tree

mod loader;
mod tree;

pub use loader::ManifestLoader;
pub use tree::{Attribute, Descendants, Element, ManifestTree, ANDROID_NS};

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a run before any extraction happens
#[derive(Error, Diagnostic, Debug)]
pub enum ManifestError {
    #[error("Erro: O arquivo '{}' não foi encontrado.", .path.display())]
    #[diagnostic(code(manifest::not_found))]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Erro: O arquivo '{}' não é um XML válido.", .path.display())]
    #[diagnostic(code(manifest::malformed))]
    MalformedDocument { path: PathBuf, reason: String },
}

impl ManifestError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Underlying cause, for debug logging
    pub fn detail(&self) -> String {
        match self {
            Self::NotFound { source, .. } => source.to_string(),
            Self::MalformedDocument { reason, .. } => reason.clone(),
        }
    }
}
