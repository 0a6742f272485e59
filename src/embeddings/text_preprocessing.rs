//! Text preprocessing utilities for embedding generation
//!
//! Cleans text before it is sent to an embedding model and splits long
//! profile documents into overlapping chunks.

use tracing::debug;
use tracing::warn;

use crate::errors::ResumeRagError;
use crate::errors::Result;

/// Upper bound on characters sent in one embedding input
pub const MAX_EMBEDDING_CHARS: usize = 8000;

/// Preprocess text for embedding generation
///
/// This function handles:
/// - Normalizing whitespace and newlines
/// - Replacing control characters
/// - Truncating overly long input at a word boundary
pub fn preprocess_text_for_embedding(text: &str) -> Result<String> {
    let normalized = normalize_whitespace(text);
    let sanitized = sanitize_text(&normalized);

    if sanitized.is_empty() {
        return Err(ResumeRagError::Embedding(
            "Text is empty after preprocessing".to_string(),
        ));
    }

    let char_count = sanitized.chars().count();
    if char_count > MAX_EMBEDDING_CHARS {
        warn!(
            "Text too long ({} chars), truncating to {}",
            char_count, MAX_EMBEDDING_CHARS
        );
        return Ok(smart_truncate_text(&sanitized, MAX_EMBEDDING_CHARS));
    }

    debug!("Preprocessed text: {} -> {} bytes", text.len(), sanitized.len());
    Ok(sanitized)
}

/// Collapse every run of whitespace (newlines and tabs included) into one space
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Replace control characters with spaces, keeping all printable Unicode
fn sanitize_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Truncate to `max_chars`, preferring a word boundary in the last quarter
fn smart_truncate_text(text: &str, max_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }

    let end = whitespace_break(&chars, 0, max_chars).unwrap_or(max_chars);
    chars[..end].iter().collect::<String>().trim_end().to_string()
}

/// Last whitespace position in `chars[start + size*3/4 .. start + size]`
fn whitespace_break(chars: &[char], start: usize, size: usize) -> Option<usize> {
    let end = (start + size).min(chars.len());
    let floor = start + size * 3 / 4;
    (floor..end)
        .rev()
        .find(|&i| chars[i].is_whitespace())
        .filter(|&i| i > start)
}

/// Split text into chunks of at most `chunk_size` characters, where each
/// chunk after the first repeats up to `overlap` trailing characters of the
/// previous one. Chunk edges snap to whitespace when one is close by.
///
/// Sizes are counted in characters, never bytes, so multi-byte text is
/// never split inside a code point.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let overlap = overlap.min(chunk_size - 1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = (start + chunk_size).min(chars.len());
        if end < chars.len() {
            if let Some(pos) = whitespace_break(&chars, start, chunk_size) {
                end = pos;
            }
        }

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        if end >= chars.len() {
            break;
        }
        let mut next = end.saturating_sub(overlap);
        if let Some(pos) = (next..end).find(|&i| chars[i].is_whitespace()) {
            next = pos + 1;
        }
        start = if next > start && next < end { next } else { end };
    }

    debug!(
        "Chunked {} chars into {} chunks (size {}, overlap {})",
        chars.len(),
        chunks.len(),
        chunk_size,
        overlap
    );
    chunks
}
