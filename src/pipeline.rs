//! Export Pipeline - Single Entry Point for Downloads
//!
//! Every download passes the "nothing to export" gate before the exporter
//! runs. No bypass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::contract::{ContractAssembler, ContractFields};
use crate::docx::{DocumentExporter, DOCX_MIME};
use crate::filename::FilenameToken;
use crate::hashing::{fields_digest, sha256_hex};

/// Title used when the request carries none.
pub const DEFAULT_TITLE: &str = "Documento";

/// Title of exported contracts.
pub const CONTRACT_TITLE: &str = "Contrato de Prestação de Serviços Advocatícios";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: generate the document first")]
    NothingToExport,

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A download request: free-form text plus optional title and filename.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub filename: Option<String>,
}

impl ExportRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Trimmed title, or [`DEFAULT_TITLE`] when absent or blank.
    pub fn resolved_title(&self) -> String {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string()
    }

    /// Filename candidate (the title when none was given), sanitized.
    pub fn resolved_filename(&self) -> FilenameToken {
        match self.filename.as_deref().filter(|f| !f.is_empty()) {
            Some(candidate) => FilenameToken::sanitize(candidate),
            None => FilenameToken::sanitize(&self.resolved_title()),
        }
    }
}

/// A ready-to-send `.docx` file and its manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocxDownload {
    pub id: String,
    pub title: String,
    pub filename: String,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
    pub size: usize,
    pub sha256: String,
    /// Fingerprint of the contract fields, for contract exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields_digest: Option<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Assembles contracts and turns text into downloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportPipeline {
    assembler: ContractAssembler,
    exporter: DocumentExporter,
}

impl ExportPipeline {
    pub fn new() -> Self {
        Self {
            assembler: ContractAssembler::new(),
            exporter: DocumentExporter::new(),
        }
    }

    pub fn assemble_contract(&self, fields: &ContractFields) -> String {
        self.assembler.assemble(fields)
    }

    /// Export free-form text.
    ///
    /// CRITICAL: blank text is refused before the exporter is invoked.
    pub fn export(&self, request: &ExportRequest) -> Result<DocxDownload, ExportError> {
        if request.text.trim().is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let title = request.resolved_title();
        let filename = request.resolved_filename().with_extension("docx");
        let bytes = self.exporter.export(&title, &request.text)?.into_inner();

        let download = DocxDownload {
            id: Uuid::new_v4().to_string(),
            title,
            filename,
            mime_type: DOCX_MIME.to_string(),
            created_at: Utc::now(),
            size: bytes.len(),
            sha256: sha256_hex(&bytes),
            fields_digest: None,
            bytes,
        };

        info!(
            id = %download.id,
            filename = %download.filename,
            size = download.size,
            "prepared docx download"
        );
        Ok(download)
    }

    /// Assemble the contract and export it in one step.
    pub fn export_contract(
        &self,
        fields: &ContractFields,
        filename: Option<&str>,
    ) -> Result<DocxDownload, ExportError> {
        let mut request = ExportRequest::new(self.assemble_contract(fields)).with_title(CONTRACT_TITLE);
        request.filename = filename.map(str::to_string);

        let mut download = self.export(&request)?;
        download.fields_digest = Some(fields_digest(fields)?);
        Ok(download)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_refused() {
        let pipeline = ExportPipeline::new();
        for text in ["", "   ", "\n\r\n\t"] {
            let err = pipeline.export(&ExportRequest::new(text)).unwrap_err();
            assert!(matches!(err, ExportError::NothingToExport));
        }
    }

    #[test]
    fn test_title_and_filename_defaults() {
        let request = ExportRequest::new("x");
        assert_eq!(request.resolved_title(), "Documento");
        assert_eq!(request.resolved_filename().as_str(), "Documento");

        let request = ExportRequest::new("x").with_title("  Parecer: LGPD  ");
        assert_eq!(request.resolved_title(), "Parecer: LGPD");
        assert_eq!(request.resolved_filename().as_str(), "Parecer_ LGPD");

        let request = request.with_filename("meu/contrato:final!!");
        assert_eq!(request.resolved_filename().as_str(), "meu_contrato_final__");
    }

    #[test]
    fn test_request_deserializes_with_text_only() {
        let request: ExportRequest = serde_json::from_str(r#"{"text": "corpo"}"#).unwrap();
        assert_eq!(request.text, "corpo");
        assert!(request.title.is_none());
        assert!(request.filename.is_none());
    }
}
