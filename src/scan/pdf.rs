use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::walker::list_pdf_files;

/// Extracted text of one PDF page
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub source: PathBuf,
    /// 1-based page number
    pub page: usize,
    pub text: String,
}

/// Turns a document on disk into per-page text, in page order.
pub trait PageExtractor: Send + Sync {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Page extraction backed by `pdf-extract`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PageExtractor for PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        pdf_extract::extract_text_by_pages(path)
            .map_err(|e| anyhow::anyhow!("Failed to extract text from {}: {}", path.display(), e))
    }
}

/// Load every non-empty page of every PDF in `folder`.
pub fn load_pages(folder: &Path, extractor: &dyn PageExtractor) -> Result<Vec<PageText>> {
    let files = list_pdf_files(folder)?;
    load_files(&files, extractor)
}

/// Load every non-empty page of `files`, in order.
pub fn load_files(files: &[PathBuf], extractor: &dyn PageExtractor) -> Result<Vec<PageText>> {
    let mut pages = Vec::new();

    for file in files {
        let texts = extractor
            .extract_pages(file)
            .with_context(|| format!("Failed to load {}", file.display()))?;

        let before = pages.len();
        for (index, text) in texts.into_iter().enumerate() {
            // pdf-extract emits layout newlines even for blank pages
            if text.trim().is_empty() {
                continue;
            }
            pages.push(PageText {
                source: file.clone(),
                page: index + 1,
                text,
            });
        }

        debug!(
            file = %file.display(),
            pages = pages.len() - before,
            "extracted pages"
        );
    }

    Ok(pages)
}
