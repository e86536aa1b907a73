//! Media type resolution and per-format text extraction

use crate::error::{Error, Result};

/// MIME string for modern Word documents
const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Media types in the supported set.
///
/// `LegacyDoc` passes the upload gate (it is a recognized type) but always
/// fails extraction with a convert-first message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    PlainText,
    Docx,
    LegacyDoc,
}

impl MediaType {
    /// Resolve a declared media type string, or fail with `UnsupportedMediaType`.
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime {
            "application/pdf" => Ok(Self::Pdf),
            "text/plain" => Ok(Self::PlainText),
            MIME_DOCX => Ok(Self::Docx),
            "application/msword" => Ok(Self::LegacyDoc),
            other => Err(Error::UnsupportedMediaType(other.to_string())),
        }
    }

    /// The MIME string for this media type
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::PlainText => "text/plain",
            Self::Docx => MIME_DOCX,
            Self::LegacyDoc => "application/msword",
        }
    }
}

/// Per-format text extractor
pub struct TextExtractor;

impl TextExtractor {
    /// Extract plain text from raw file bytes.
    ///
    /// Pure from the caller's view; failure is terminal for the request,
    /// no retry is attempted.
    pub fn extract(media_type: MediaType, data: &[u8]) -> Result<String> {
        match media_type {
            MediaType::PlainText => Self::extract_text(data),
            MediaType::Pdf => Self::extract_pdf(data),
            MediaType::Docx => Self::extract_docx(data),
            MediaType::LegacyDoc => Err(Error::extraction(
                media_type.as_mime(),
                "legacy .doc files are not supported, convert to .docx first",
            )),
        }
    }

    fn extract_text(data: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::extraction("text/plain", format!("invalid UTF-8: {}", e)))?;
        Ok(text.to_string())
    }

    fn extract_pdf(data: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::extraction("application/pdf", e.to_string()))
    }

    fn extract_docx(data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| Error::extraction(MIME_DOCX, e.to_string()))?;

        let mut content = String::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                content.push_str(&t.text);
                            }
                        }
                    }
                }
                content.push('\n');
            }
        }

        Ok(content)
    }
}
