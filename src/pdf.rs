use std::path::Path;

use anyhow::{Context, Result};
use lopdf::Document;

/// Extract the full text of a PDF, pages concatenated in page-number order.
/// A page that fails to decode is skipped; an unloadable document is an
/// error, which the scanner records as a per-file skip.
pub fn extract_text(path: &Path) -> Result<String> {
    let doc = Document::load(path)
        .with_context(|| format!("failed to load PDF {}", path.display()))?;

    let mut full_text = String::new();
    for (page_num, _object_id) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(text) => full_text.push_str(&text),
            Err(e) => {
                tracing::debug!(page = page_num, path = %path.display(), "page extraction failed: {e}");
            }
        }
    }

    Ok(full_text)
}
