use prodsearch_common::{ProdSearchError, Result};

use crate::text::{normalize, split_sentences};
use crate::types::Chunk;

/// Default maximum characters per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 300;

/// Default characters of trailing context carried into the next chunk
pub const DEFAULT_OVERLAP: usize = 50;

/// Splits long description text into bounded, overlapping chunks
///
/// Pure: the same text and configuration always produce the same chunks.
/// All sizes and offsets are counted in chars, never bytes.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl TextChunker {
    /// Create a chunker, validating the configuration up front
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ProdSearchError::config("Chunk size must be greater than 0"));
        }
        if overlap >= chunk_size {
            return Err(ProdSearchError::config(format!(
                "Overlap ({}) must be smaller than chunk size ({})",
                overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split description text into overlapping chunks
    ///
    /// Empty text produces no chunks (the caller falls back to a
    /// metadata-only document). Text within the chunk size produces a
    /// single chunk. Longer text is packed sentence by sentence; when no
    /// sentence boundaries are found, a fixed character window is used.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let text = normalize(text);
        if text.is_empty() {
            return Vec::new();
        }

        if char_len(&text) <= self.chunk_size {
            return vec![Chunk {
                text,
                chunk_index: 0,
                start_offset: 0,
            }];
        }

        let sentences = split_sentences(&text);
        if sentences.len() > 1 {
            self.pack_sentences(&sentences)
        } else {
            self.char_windows(&text)
        }
    }

    /// Greedily pack whole sentences into chunks, seeding each new chunk
    /// with the tail of the previous one.
    ///
    /// A single sentence longer than the chunk size is still appended
    /// whole; the resulting chunk may exceed the bound rather than split a
    /// sentence mid-meaning.
    fn pack_sentences(&self, sentences: &[String]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut buffer_chars = 0usize;
        // Chars of overlap seeding the current buffer; not new content.
        let mut seed_chars = 0usize;
        let mut chunk_index = 0usize;
        let mut chunk_start = 0usize;

        for sentence in sentences {
            let sentence_chars = char_len(sentence);
            let appended_chars = if buffer.is_empty() {
                sentence_chars
            } else {
                buffer_chars + 1 + sentence_chars
            };

            if appended_chars > self.chunk_size && !buffer.is_empty() {
                // Close the current chunk
                let text = buffer.trim().to_string();
                let text_chars = char_len(&text);
                chunks.push(Chunk {
                    text,
                    chunk_index,
                    start_offset: chunk_start,
                });
                chunk_index += 1;
                chunk_start += text_chars.saturating_sub(seed_chars);

                // Seed the next buffer with the previous tail, then the sentence
                let seed = tail_chars(&buffer, self.overlap);
                seed_chars = char_len(&seed);
                buffer = format!("{} {}", seed, sentence);
                buffer_chars = seed_chars + 1 + sentence_chars;
            } else if buffer.is_empty() {
                buffer = sentence.clone();
                buffer_chars = sentence_chars;
            } else {
                buffer.push(' ');
                buffer.push_str(sentence);
                buffer_chars += 1 + sentence_chars;
            }
        }

        let text = buffer.trim().to_string();
        if !text.is_empty() {
            chunks.push(Chunk {
                text,
                chunk_index,
                start_offset: chunk_start,
            });
        }

        chunks
    }

    /// Fallback for text with no sentence boundaries: step through in
    /// strides of `chunk_size - overlap`, emitting up to `chunk_size`
    /// chars per stride.
    fn char_windows(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let stride = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();

        let mut chunk_index = 0usize;
        let mut start = 0usize;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(Chunk {
                text: chars[start..end].iter().collect(),
                chunk_index,
                start_offset: start,
            });
            chunk_index += 1;
            start += stride;
        }

        chunks
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Last `n` chars of a string, or the whole string if shorter
fn tail_chars(text: &str, n: usize) -> String {
    let len = char_len(text);
    if len <= n {
        text.to_string()
    } else {
        text.chars().skip(len - n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_rejected() {
        assert!(TextChunker::new(0, 0).is_err());
        assert!(TextChunker::new(10, 10).is_err());
        assert!(TextChunker::new(10, 15).is_err());
        assert!(TextChunker::new(10, 3).is_ok());
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunker = TextChunker::new(10, 3).unwrap();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("  \n\t ").is_empty());
    }

    #[test]
    fn test_short_text_yields_single_chunk() {
        let chunker = TextChunker::new(10, 3).unwrap();
        let chunks = chunker.chunk("short");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "short");
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].start_offset, 0);
    }

    #[test]
    fn test_sentence_packing_respects_bound() {
        let chunker = TextChunker::new(30, 5).unwrap();
        let text = "One sentence here. Another one. Third sentence. A fourth one.";
        let chunks = chunker.chunk(text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.text.is_empty());
        }
    }

    #[test]
    fn test_chunk_indices_strictly_increasing_from_zero() {
        let chunker = TextChunker::new(30, 5).unwrap();
        let text = "One sentence here. Another one. Third sentence. A fourth one.";
        let chunks = chunker.chunk(text);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
        }
    }

    #[test]
    fn test_never_splits_a_sentence() {
        let chunker = TextChunker::new(20, 5).unwrap();
        // Second sentence alone exceeds the chunk size
        let long = "thisisaverylongsentencewithoutanybreaks indeed";
        let text = format!("Short one. {}. Tail.", long);
        let chunks = chunker.chunk(&text);

        // The oversize sentence must appear whole in exactly one chunk
        let holders: Vec<_> = chunks.iter().filter(|c| c.text.contains(long)).collect();
        assert_eq!(holders.len(), 1);
    }

    #[test]
    fn test_overlap_carried_between_chunks() {
        let chunker = TextChunker::new(30, 8).unwrap();
        let text = "First sentence is here. Second sentence follows. Third sentence ends.";
        let chunks = chunker.chunk(text);
        assert!(chunks.len() >= 2);

        // Each chunk after the first starts with the tail of its predecessor
        for pair in chunks.windows(2) {
            let tail = tail_chars(&pair[0].text, 8);
            assert!(
                pair[1].text.starts_with(tail.trim_start()),
                "chunk {:?} does not start with overlap {:?}",
                pair[1].text,
                tail
            );
        }
    }

    #[test]
    fn test_char_window_fallback() {
        let chunker = TextChunker::new(10, 3).unwrap();
        // 20 chars, no sentence boundaries: stride 7
        let text = "abcdefghijklmnopqrst";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks[0].text, "abcdefghij");
        assert_eq!(chunks[0].start_offset, 0);
        assert_eq!(chunks[1].text, "hijklmnopq");
        assert_eq!(chunks[1].start_offset, 7);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
            assert!(chunk.text.chars().count() <= 10);
        }
    }

    #[test]
    fn test_char_window_is_unicode_safe() {
        let chunker = TextChunker::new(10, 3).unwrap();
        // Multi-byte chars, no sentence boundaries
        let text = "máy ảnh kỹ thuật số chất lượng cao";
        let chunks = chunker.chunk(text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 10);
        }
    }

    #[test]
    fn test_deterministic() {
        let chunker = TextChunker::new(40, 10).unwrap();
        let text = "Quality product. Ships fast. Great reviews from customers. Works well.";
        assert_eq!(chunker.chunk(text), chunker.chunk(text));
    }

    #[test]
    fn test_long_description_covers_full_text() {
        let chunker = TextChunker::default();
        // ~1000 chars of sentences
        let sentence = "This product has a durable build and a comfortable grip for daily use.";
        let text = std::iter::repeat(sentence)
            .take(14)
            .collect::<Vec<_>>()
            .join(" ");
        let chunks = chunker.chunk(&text);

        assert!(chunks.len() >= 3);
        // Every sentence body appears in some chunk
        let combined: String = chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join(" ");
        assert!(combined.contains("durable build"));
        assert!(combined.contains("comfortable grip"));
    }
}
