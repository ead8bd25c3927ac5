//! Text chunking for the translate-TTS endpoint.
//!
//! The endpoint accepts at most ~100 characters per request, so longer text
//! is split into chunks and the returned MP3 frames are concatenated.  Chunks
//! break at whitespace where possible; a single run of more than
//! [`MAX_CHUNK_CHARS`] non-whitespace characters (common in Japanese, which
//! has no word spacing) is hard-split.

/// Maximum characters (not bytes) per synthesis request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Whitespace between chunks is dropped; whitespace inside a chunk is kept
/// as-is.  Empty input yields no chunks.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in split_words(text, max_chars) {
        let word_chars = word.chars().count();

        if current_chars > 0 && current_chars + 1 + word_chars > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word.as_str());
        current_chars += word_chars;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Whitespace-split `text`, hard-splitting any single token longer than
/// `max_chars`.
fn split_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut words = Vec::new();
    for token in text.split_whitespace() {
        if token.chars().count() <= max_chars {
            words.push(token.to_string());
            continue;
        }
        let chars: Vec<char> = token.chars().collect();
        for piece in chars.chunks(max_chars) {
            words.push(piece.iter().collect());
        }
    }
    words
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = chunk_text("hello world", MAX_CHUNK_CHARS);
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", MAX_CHUNK_CHARS).is_empty());
        assert!(chunk_text("   \n ", MAX_CHUNK_CHARS).is_empty());
    }

    #[test]
    fn splits_at_word_boundaries() {
        let chunks = chunk_text("one two three four", 9);
        assert_eq!(chunks, vec!["one two", "three", "four"]);
    }

    #[test]
    fn no_chunk_exceeds_the_limit() {
        let text = "lorem ipsum dolor sit amet ".repeat(40);
        for chunk in chunk_text(&text, MAX_CHUNK_CHARS) {
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS);
        }
    }

    #[test]
    fn overlong_token_is_hard_split() {
        let token = "x".repeat(250);
        let chunks = chunk_text(&token, MAX_CHUNK_CHARS);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 100);
        assert_eq!(chunks[2].chars().count(), 50);
    }

    #[test]
    fn hard_split_counts_characters_not_bytes() {
        // Japanese text has no whitespace; each char is 3 bytes in UTF-8.
        let text = "こんにちは".repeat(30); // 150 chars
        let chunks = chunk_text(&text, MAX_CHUNK_CHARS);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 100);
        assert_eq!(chunks[1].chars().count(), 50);
    }

    #[test]
    fn chunks_reassemble_to_the_original_words() {
        let text = "the quick brown fox jumps over the lazy dog";
        let joined = chunk_text(text, 12).join(" ");
        assert_eq!(joined, text);
    }
}
