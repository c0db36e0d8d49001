//! Document text extraction seam.
//!
//! Parsing PDF or Word files belongs to an external collaborator that
//! implements `TextExtractor`. The built-in `PlainTextExtractor` only handles
//! UTF-8 text formats and rejects everything else.

use std::path::Path;

use anyhow::{bail, Context};

/// One uploaded file, in upload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Lower-cased extension, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

/// Converts an uploaded document into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, file: &UploadedFile) -> anyhow::Result<String>;
}

/// Extensions the plain-text extractor accepts.
pub const PLAIN_TEXT_EXTENSIONS: &[&str] = &["txt", "md", "csv"];

/// Extractor for UTF-8 text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, file: &UploadedFile) -> anyhow::Result<String> {
        let Some(ext) = file.extension() else {
            bail!("file has no extension; cannot determine its format");
        };
        if !PLAIN_TEXT_EXTENSIONS.contains(&ext.as_str()) {
            bail!("unsupported document format: .{} (extract text before submitting)", ext);
        }
        String::from_utf8(file.bytes.clone()).context("file is not valid UTF-8 text")
    }
}

/// Display label for an uploaded file, from its extension.
pub fn document_kind(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => "PDF Document",
        Some("docx") | Some("doc") => "Word Document",
        Some("txt") => "Text File",
        _ => "Document",
    }
}
