//! PDF text extraction.

use std::path::Path;

use tracing::info;

use crate::errors::DocIndexError;

/// Extracts the full text of a PDF document.
///
/// Collapses runs of whitespace so the splitter sees a clean stream; PDF
/// extraction tends to produce stray newlines and repeated spaces.
///
/// # Errors
/// [`DocIndexError::Extract`] when the file cannot be read or parsed, and
/// [`DocIndexError::EmptyDocument`] when no usable text remains.
pub(crate) fn load_document_text(path: &Path) -> Result<String, DocIndexError> {
    let raw = pdf_extract::extract_text(path).map_err(|e| DocIndexError::Extract {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let text = normalize_whitespace(&raw);
    if text.is_empty() {
        return Err(DocIndexError::EmptyDocument(path.to_path_buf()));
    }

    info!(
        target: "doc_index::loader",
        path = %path.display(),
        chars = text.chars().count(),
        "document text extracted"
    );

    Ok(text)
}

/// Collapses any whitespace run into a single space and trims the ends.
pub(crate) fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_newlines_and_spaces() {
        let raw = "Hotel  rooftop\n\nbar opens\tat 5pm. ";
        assert_eq!(
            normalize_whitespace(raw),
            "Hotel rooftop bar opens at 5pm."
        );
    }

    #[test]
    fn normalize_of_blank_input_is_empty() {
        assert_eq!(normalize_whitespace(" \n \t "), "");
    }
}
