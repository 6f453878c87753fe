//! DOCX paragraph extraction using zip and quick-xml.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, trace};

use super::Result;
use crate::error::NormalizeError;

const FORMAT: &str = "docx";
const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the body paragraphs of an Office Open XML document.
#[derive(Debug, Clone, Default)]
pub struct DocxReader;

impl DocxReader {
    pub fn new() -> Self {
        Self
    }

    /// Extract body paragraphs joined by line breaks, in document order.
    pub fn read_text(&self, data: &[u8]) -> Result<String> {
        let xml = self.read_document_part(data)?;
        let paragraphs = parse_paragraphs(&xml)?;
        debug!("Read {} paragraphs from DOCX", paragraphs.len());
        Ok(paragraphs.join("\n"))
    }

    fn read_document_part(&self, data: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| NormalizeError::malformed(FORMAT, e))?;

        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| NormalizeError::malformed(FORMAT, format!("{DOCUMENT_PART}: {e}")))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| NormalizeError::malformed(FORMAT, e))?;
        Ok(xml)
    }
}

/// Collect the text of top-level body paragraphs.
///
/// Paragraphs nested in tables or text boxes are skipped.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut nested = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| NormalizeError::malformed(FORMAT, e))?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" => nested += 1,
                b"p" if nested == 0 => current = Some(String::new()),
                b"t" if nested == 0 => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" => nested = nested.saturating_sub(1),
                b"p" if nested == 0 => {
                    if let Some(paragraph) = current.take() {
                        trace!("Paragraph: {:?}", paragraph);
                        paragraphs.push(paragraph);
                    }
                }
                b"t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) if nested == 0 => match (e.local_name().as_ref(), current.as_mut()) {
                (b"tab", Some(paragraph)) => paragraph.push('\t'),
                (b"br" | b"cr", Some(paragraph)) => paragraph.push('\n'),
                (b"p", None) => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(e) if in_text && nested == 0 => {
                let text = e
                    .unescape()
                    .map_err(|err| NormalizeError::malformed(FORMAT, err))?;
                if let Some(paragraph) = current.as_mut() {
                    paragraph.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
