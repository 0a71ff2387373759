//! Overlapping character splitter for document text.

/// Splits `text` into chunks of at most `chunk_size` characters, where each
/// chunk starts `chunk_overlap` characters before the previous one ended.
///
/// Breaks prefer the last whitespace in the window once the chunk is past
/// half its target size, so words are kept intact where possible. Operates
/// on characters, never on raw bytes, so multi-byte text is safe.
///
/// Caller guarantees `chunk_overlap < chunk_size` (validated by
/// `IndexConfig`).
pub(crate) fn split_overlapping(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();
    if total == 0 {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        let hard_end = (start + chunk_size).min(total);
        let end = if hard_end < total {
            match chars[start..hard_end].iter().rposition(|c| c.is_whitespace()) {
                Some(rel) if rel > chunk_size / 2 => start + rel,
                _ => hard_end,
            }
        } else {
            hard_end
        };

        let piece: String = chars[start..end].iter().collect();
        let piece = piece.trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }

        if end >= total {
            break;
        }
        // Step back by the overlap, but always make forward progress.
        start = end.saturating_sub(chunk_overlap).max(start + 1);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = split_overlapping("rooftop bar opens at 5pm", 200, 30);
        assert_eq!(chunks, vec!["rooftop bar opens at 5pm".to_string()]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_overlapping("", 200, 30).is_empty());
    }

    #[test]
    fn unbroken_text_uses_exact_size_and_overlap() {
        let text: String = ('a'..='z').cycle().take(250).collect();
        let chunks = split_overlapping(&text, 100, 10);

        assert_eq!(chunks[0].chars().count(), 100);
        // Next chunk restarts 10 chars before the previous end.
        let tail: String = chunks[0].chars().skip(90).collect();
        let head: String = chunks[1].chars().take(10).collect();
        assert_eq!(tail, head);
    }

    #[test]
    fn chunks_never_exceed_target_size() {
        let text = "The hotel spa offers massages daily. ".repeat(40);
        for chunk in split_overlapping(&text, 200, 30) {
            assert!(chunk.chars().count() <= 200);
        }
    }

    #[test]
    fn breaks_prefer_whitespace_boundaries() {
        let words = ["breakfast", "is", "served", "in", "the", "garden", "restaurant"];
        let text = "breakfast is served in the garden restaurant ".repeat(20);
        for chunk in split_overlapping(&text, 200, 30) {
            // Chunk ends break at whitespace, so the last word is intact.
            // Starts may sit mid-word because the overlap is a plain
            // character step-back.
            assert!(!chunk.starts_with(' ') && !chunk.ends_with(' '));
            let last = chunk.split(' ').next_back().unwrap();
            assert!(words.contains(&last), "split mid-word at end: {last:?}");
        }
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "café crème brûlée ".repeat(30);
        let chunks = split_overlapping(&text, 50, 10);
        assert!(!chunks.is_empty());
        for chunk in chunks {
            assert!(chunk.chars().count() <= 50);
        }
    }
}
