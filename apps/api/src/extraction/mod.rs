//! Upload text extraction. Turns uploaded file bytes into plain text for the
//! ranking engine. A failed file is reported back to the caller and left out
//! of the batch; it never fails the request on its own.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("File is not valid UTF-8 text")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Supported upload formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    PlainText,
}

impl FileKind {
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(FileKind::Pdf),
            "txt" | "text" | "md" => Ok(FileKind::PlainText),
            "" => Err(ExtractionError::UnsupportedFormat(
                "missing file extension".to_string(),
            )),
            other => Err(ExtractionError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// Extracts plain text from an uploaded file.
pub async fn extract_text(filename: &str, bytes: Vec<u8>) -> Result<String, ExtractionError> {
    let text = match FileKind::from_filename(filename)? {
        FileKind::PlainText => String::from_utf8(bytes)?,
        FileKind::Pdf => extract_pdf(bytes).await?,
    };
    debug!("Extracted {} chars from {filename}", text.chars().count());
    Ok(text)
}

async fn extract_pdf(bytes: Vec<u8>) -> Result<String, ExtractionError> {
    // pdf-extract is CPU-bound and may panic on malformed input; a panic surfaces as a JoinError.
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| ExtractionError::Pdf(format!("extraction task failed: {e}")))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_by_extension() {
        assert_eq!(FileKind::from_filename("cv.PDF").unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::from_filename("cv.txt").unwrap(), FileKind::PlainText);
        assert_eq!(FileKind::from_filename("notes.md").unwrap(), FileKind::PlainText);
    }

    #[test]
    fn test_unsupported_extensions() {
        assert!(matches!(
            FileKind::from_filename("cv.docx"),
            Err(ExtractionError::UnsupportedFormat(ext)) if ext == ".docx"
        ));
        assert!(matches!(
            FileKind::from_filename("resume"),
            Err(ExtractionError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_plain_text_passthrough() {
        let text = extract_text("a.txt", b"Rust engineer".to_vec()).await.unwrap();
        assert_eq!(text, "Rust engineer");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_rejected() {
        let err = extract_text("a.txt", vec![0xff, 0xfe, 0xfd]).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Encoding(_)));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_rejected() {
        let err = extract_text("a.pdf", b"definitely not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }
}
