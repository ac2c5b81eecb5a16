//! Tabular export seam for browsed records.
//!
//! Shells put an export button next to the list views. The core only defines
//! the handoff: a format tag, an error vocabulary, and the `RowExporter`
//! trait. Encoders live in the shell (or a sibling crate) and are handed in;
//! none ship here.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Export failure surfaced to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("{format} export is not supported by this exporter")]
    Unsupported { format: ExportFormat },
    #[error("failed to encode export: {0}")]
    Encode(String),
}

/// Encoder from record rows to a downloadable byte payload.
///
/// Implementations advertise which formats they handle by returning
/// [`ExportError::Unsupported`] for the rest.
pub trait RowExporter<T> {
    fn export(&self, format: ExportFormat, rows: &[T]) -> Result<Vec<u8>, ExportError>;
}
