//! PDF downloading and text extraction.
//!
//! Primary extraction is page-by-page via `lopdf`; documents it cannot read
//! fall back to `pdf-extract` over the whole file, with page boundaries
//! recovered from form feeds. Non-fatal extraction problems are collected
//! as warnings rather than failing the document.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::Document;
use reqwest::blocking::Client;
use unicode_normalization::UnicodeNormalization;

use crate::config::{download_filename, DOWNLOAD_DIR_NAME};
use crate::error::{CodifierError, Result};
use crate::http::{create_client, download_bytes};

/// One page of extracted text. Page numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// Extracted document text with non-fatal extraction warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Non-empty pages in document order.
    pub pages: Vec<PageText>,
    /// Pages or passes that failed without failing the document.
    pub warnings: Vec<String>,
}

impl ExtractedDocument {
    /// Join pages into a single text block for prompting.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Join pages with page markers. Used for amendment parsing, where
    /// change instructions are attributed to amendment pages.
    #[must_use]
    pub fn paged_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| format!("--- PAGE {} ---\n{}", page.number, page.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A document source locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An http(s) URL to download.
    Url(String),
    /// A local PDF file.
    File(PathBuf),
}

impl Source {
    /// Classify and validate a locator string before any I/O happens.
    ///
    /// # Errors
    /// Local paths must exist and carry a `.pdf` extension; anything that
    /// is neither an http(s) URL nor such a path is rejected.
    pub fn parse(locator: &str) -> Result<Self> {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            return Ok(Self::Url(locator.to_string()));
        }

        let path = PathBuf::from(locator);
        if !path.is_file() {
            return Err(CodifierError::InvalidSource(format!(
                "file not found: {locator}"
            )));
        }
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(CodifierError::InvalidSource(format!(
                "not a PDF file: {locator}"
            )));
        }
        Ok(Self::File(path))
    }
}

/// Download a PDF to the lexcodify temp directory and return its path.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL of the document
pub fn download_pdf(client: &Client, url: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(DOWNLOAD_DIR_NAME);
    fs::create_dir_all(&dir)?;

    let target = dir.join(download_filename(url));
    tracing::info!(url, target = %target.display(), "Downloading document");

    let bytes = download_bytes(client, url)?;
    fs::write(&target, &bytes)?;

    Ok(target)
}

/// Extract per-page text from a PDF file.
///
/// # Errors
/// Fails with [`CodifierError::Pdf`] only when neither extraction pass
/// recovers any text at all.
pub fn extract_pages(path: &Path) -> Result<ExtractedDocument> {
    let bytes = fs::read(path)?;

    match extract_with_lopdf(&bytes) {
        Ok(extracted) if !extracted.pages.is_empty() => Ok(extracted),
        Ok(extracted) => {
            let mut warnings = extracted.warnings;
            warnings.push("no text recovered page-by-page, trying whole-document extraction".to_string());
            extract_fallback(&bytes, warnings, path)
        }
        Err(message) => extract_fallback(
            &bytes,
            vec![format!("document could not be read page-by-page: {message}")],
            path,
        ),
    }
}

/// Fetch the text of a document from a URL or local path.
///
/// Downloads the PDF first when the locator is a URL, then extracts the
/// ordered page texts.
pub fn fetch_text(locator: &str) -> Result<ExtractedDocument> {
    let path = match Source::parse(locator)? {
        Source::Url(url) => {
            let client = create_client()?;
            download_pdf(&client, &url)?
        }
        Source::File(path) => path,
    };
    extract_pages(&path)
}

/// Render extracted text with page markers and continuous line numbers.
///
/// Blank lines are skipped; the line counter runs across page boundaries.
#[must_use]
pub fn render_numbered_text(document: &ExtractedDocument) -> String {
    let mut out = String::new();
    let mut line_number = 1u32;

    for page in &document.pages {
        out.push_str(&format!("--- PAGE {} ---\n", page.number));
        for line in page.text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            out.push_str(&format!("{line_number:4}: {line}\n"));
            line_number += 1;
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

fn extract_with_lopdf(bytes: &[u8]) -> std::result::Result<ExtractedDocument, String> {
    let doc = Document::load_mem(bytes).map_err(|e| e.to_string())?;

    let mut pages = Vec::new();
    let mut warnings = Vec::new();

    for (number, _object_id) in doc.get_pages() {
        match doc.extract_text(&[number]) {
            Ok(text) => {
                let text = normalize_text(&text);
                if !text.is_empty() {
                    pages.push(PageText { number, text });
                }
            }
            Err(e) => warnings.push(format!("page {number}: {e}")),
        }
    }

    Ok(ExtractedDocument { pages, warnings })
}

fn extract_fallback(
    bytes: &[u8],
    warnings: Vec<String>,
    path: &Path,
) -> Result<ExtractedDocument> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| CodifierError::Pdf {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    // pdf-extract emits the whole document at once; form feeds mark page breaks
    let pages: Vec<PageText> = text
        .split('\x0C')
        .enumerate()
        .filter_map(|(index, page)| {
            let page = normalize_text(page);
            (!page.is_empty()).then(|| PageText {
                number: index as u32 + 1,
                text: page,
            })
        })
        .collect();

    if pages.is_empty() {
        return Err(CodifierError::Pdf {
            path: path.display().to_string(),
            message: "no text could be extracted".to_string(),
        });
    }

    Ok(ExtractedDocument { pages, warnings })
}

/// Normalize extracted text: NFKC (ligatures, non-breaking spaces,
/// compatibility forms), trimmed line ends, outer whitespace removed.
fn normalize_text(text: &str) -> String {
    let text: String = text.nfkc().collect();
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
