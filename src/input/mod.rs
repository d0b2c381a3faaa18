//! Input processing module
//! Handles file kind detection, uploaded documents and text extraction

pub mod document;
pub mod file_detector;
pub mod text_extractor;

pub use document::UploadedDocument;
pub use file_detector::FileKind;
