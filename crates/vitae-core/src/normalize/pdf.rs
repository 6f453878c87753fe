//! PDF text extraction using lopdf and pdf-extract.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::Result;
use crate::error::NormalizeError;

const FORMAT: &str = "pdf";

/// Page-based text extractor for PDF documents.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc =
            Document::load_mem(data).map_err(|e| NormalizeError::malformed(FORMAT, e))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(NormalizeError::malformed(FORMAT, "PDF is encrypted"));
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data).map_err(|e| {
                NormalizeError::malformed(FORMAT, format!("failed to save decrypted PDF: {e}"))
            })?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        debug!("Loaded PDF with {} pages", doc.get_pages().len());
        self.document = Some(doc);
        Ok(())
    }

    /// Get the number of pages in the loaded PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Extract the text of every page in page order.
    ///
    /// Pages without extractable text (scanned images) yield an empty string.
    pub fn extract_page_texts(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(NormalizeError::malformed(FORMAT, "no document loaded"));
        }

        if self.page_count() == 0 {
            return Ok(Vec::new());
        }

        // pdf-extract panics on some documents lopdf accepts (missing fonts, broken cmaps).
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
        }))
        .map_err(|payload| {
            let message = panic_message(payload.as_ref());
            warn!("PDF text extraction panicked: {}", message);
            NormalizeError::malformed(FORMAT, format!("text extraction failed: {message}"))
        })?
        .map_err(|e| NormalizeError::malformed(FORMAT, e))?;

        for (i, page) in pages.iter().enumerate() {
            trace!("Page {}: {} chars", i + 1, page.len());
        }

        Ok(pages)
    }

    /// Extract the text of the whole document, pages concatenated in order.
    pub fn extract_text(&self) -> Result<String> {
        Ok(self.extract_page_texts()?.concat())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}
