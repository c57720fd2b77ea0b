//! Scoped export staging.
//!
//! A document is rendered into a named temp file owned by a [`StagedExport`].
//! The file is removed when the value is dropped, whichever way the caller
//! leaves. If rendering fails the half-written file is removed before the
//! error is returned.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::ExportError;
use crate::styles::DocumentStyles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Download name for a patient's report, e.g. `Jane Doe_Medical_Report.pdf`.
pub fn file_name(patient_name: &str, format: DocumentFormat) -> String {
    format!("{patient_name}_Medical_Report.{}", format.extension())
}

#[derive(Debug)]
pub struct StagedExport {
    file: NamedTempFile,
    file_name: String,
    format: DocumentFormat,
}

impl StagedExport {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// Read the staged document back.
    pub fn bytes(&self) -> Result<Vec<u8>, ExportError> {
        Ok(std::fs::read(self.file.path())?)
    }
}

/// Render `report` for `patient_name` into a temp file.
pub fn stage(
    report: &str,
    patient_name: &str,
    format: DocumentFormat,
    styles: &DocumentStyles,
) -> Result<StagedExport, ExportError> {
    let mut file = tempfile::Builder::new()
        .prefix("cerebra-")
        .suffix(&format!(".{}", format.extension()))
        .tempfile()?;

    match format {
        DocumentFormat::Pdf => {
            let mut out = BufWriter::new(file.as_file_mut());
            crate::pdf::write_pdf(report, styles, &mut out)?;
            out.flush()?;
        }
        DocumentFormat::Docx => {
            let bytes = crate::docx::generate_docx(report, styles)?;
            file.write_all(&bytes)?;
            file.flush()?;
        }
    }

    tracing::debug!(path = %file.path().display(), format = format.extension(), "export staged");

    Ok(StagedExport {
        file,
        file_name: file_name(patient_name, format),
        format,
    })
}
