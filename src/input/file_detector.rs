//! File kind detection

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extensions accepted by the upload surface
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Pdf,
    Text,
    /// Anything else is decoded as plain text
    Other,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileKind::Pdf,
            "txt" => FileKind::Text,
            _ => FileKind::Other,
        }
    }

    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileKind::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(FileKind::from_extension("PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_extension("Txt"), FileKind::Text);
        assert_eq!(FileKind::from_extension("docx"), FileKind::Other);
    }

    #[test]
    fn test_from_filename() {
        assert_eq!(FileKind::from_filename("cv.final.pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_filename("resume.txt"), FileKind::Text);
        assert_eq!(FileKind::from_filename("README"), FileKind::Other);
    }
}
