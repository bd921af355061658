//! Document text extraction.
//!
//! Supplies `(identifier, text)` pairs to the orchestrator; the analyzers
//! themselves never touch the filesystem. Manifestos arrive as `.pdf`,
//! `.txt` or `.docx`; extracted text is whitespace-normalized and
//! lower-cased before analysis.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;
use zip::ZipArchive;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },
}

/// Extract the lower-cased text of a document, dispatching on the file
/// extension.
pub fn extract_document(path: &Path) -> Result<String, ExtractError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_lowercase);
    let raw = match extension.as_deref() {
        Some("pdf") => pdf_extract::extract_text(path).map_err(|e| read_error(path, e))?,
        Some("txt") => std::fs::read_to_string(path).map_err(|e| read_error(path, e))?,
        Some("docx") => extract_docx(path)?,
        _ => return Err(ExtractError::UnsupportedFormat(path.to_path_buf())),
    };
    Ok(normalize(&raw))
}

/// Document identifier: the lower-cased file stem.
pub fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| read_error(path, e))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|_| read_error(path, "missing word/document.xml"))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| read_error(path, e))?;
    docx_body_text(&xml).map_err(|message| read_error(path, message))
}

fn docx_body_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut out = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                if element.name().local_name().as_ref() == b"br" {
                    out.push('\n');
                }
            }
            Ok(Event::End(element)) => {
                if element.name().local_name().as_ref() == b"p" {
                    out.push('\n');
                }
            }
            Ok(Event::Text(text)) => {
                let decoded = text.decode().map_err(|e| e.to_string())?;
                out.push_str(&quick_xml::escape::unescape(&decoded).map_err(|e| e.to_string())?);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
    }
    Ok(out)
}

/// Trim lines, drop blank ones, lower-case the rest.
fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&line.to_lowercase());
    }
    out
}

fn read_error(path: &Path, message: impl ToString) -> ExtractError {
    ExtractError::Read {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
