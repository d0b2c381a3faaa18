//! Uploaded documents and the analysis requests built from them

use crate::error::{CritiqueError, Result};
use crate::input::file_detector::{FileKind, ALLOWED_EXTENSIONS};
use crate::input::text_extractor::extract_text;
use log::info;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs;

/// A file handed over by the presentation layer. Dropped once its text is extracted.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    bytes: Vec<u8>,
    filename: String,
    kind: FileKind,
    content_hash: String,
}

/// Extracted text ready for scoring and feedback
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub filename: String,
    pub text: String,
    pub job_role: Option<String>,
    pub content_hash: String,
}

impl UploadedDocument {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let kind = FileKind::from_filename(&filename);
        let content_hash = content_hash(&bytes);
        Self {
            bytes,
            filename,
            kind,
            content_hash,
        }
    }

    /// Read a `.pdf` or `.txt` file from disk
    pub async fn from_path(path: &Path) -> Result<Self> {
        validate_extension(path)?;

        let bytes = fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        info!("Loaded {} ({} bytes)", filename, bytes.len());
        Ok(Self::new(bytes, filename))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Extract the text and consume the raw bytes.
    /// Documents without any non-whitespace text are unreadable.
    pub fn into_request(self, job_role: Option<&str>) -> Result<AnalysisRequest> {
        let text = extract_text(&self.bytes, self.kind)?;

        if text.trim().is_empty() {
            return Err(CritiqueError::UnreadableDocument(format!(
                "The uploaded file '{}' is empty",
                self.filename
            )));
        }

        Ok(AnalysisRequest {
            filename: self.filename,
            text,
            job_role: job_role
                .map(str::trim)
                .filter(|role| !role.is_empty())
                .map(str::to_string),
            content_hash: self.content_hash,
        })
    }
}

/// SHA-256 hex digest of the raw bytes
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}

/// Validate file extension against the accepted upload types
pub fn validate_extension(path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(CritiqueError::UnsupportedFormat(format!(
            "Unsupported file extension: .{}. Allowed: {}",
            ext,
            ALLOWED_EXTENSIONS.join(", ")
        ))),
        None => Err(CritiqueError::UnsupportedFormat(format!(
            "File has no extension: {}",
            path.display()
        ))),
    }
}
