//! Paragraph chunking for long documents

/// Splits text into chunks of at most `max_chars` characters
///
/// Paragraphs (separated by blank lines) are packed greedily; a paragraph
/// longer than the limit is cut on character boundaries.
pub struct TextChunker {
    max_chars: usize,
}

impl TextChunker {
    /// Create a chunker; a zero limit is treated as one character
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    /// Chunk the given text
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.chars().count() <= self.max_chars {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            let len = paragraph.chars().count();

            if current_len > 0 && current_len + 2 + len > self.max_chars {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if len > self.max_chars {
                chunks.extend(self.split_at_char_limit(paragraph));
                continue;
            }

            if current_len > 0 {
                current.push_str("\n\n");
                current_len += 2;
            }
            current.push_str(paragraph);
            current_len += len;
        }

        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }

    fn split_at_char_limit(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.max_chars)
            .map(|piece| piece.iter().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_is_one_chunk() {
        let chunks = TextChunker::new(100).chunk("Short text here.");
        assert_eq!(chunks, vec!["Short text here."]);
    }

    #[test]
    fn test_paragraphs_are_packed() {
        let text = "First paragraph here.\n\nSecond paragraph here.\n\nThird paragraph here.";
        let chunks = TextChunker::new(50).chunk(text);
        assert_eq!(
            chunks,
            vec!["First paragraph here.\n\nSecond paragraph here.", "Third paragraph here."]
        );
    }

    #[test]
    fn test_long_paragraph_is_split() {
        let chunks = TextChunker::new(20).chunk(&"a".repeat(100));
        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.len() == 20));
    }

    #[test]
    fn test_multibyte_text_is_split_on_char_boundaries() {
        let text = "é".repeat(30);
        let chunks = TextChunker::new(7).chunk(&text);
        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.chars().count() <= 7));
        assert_eq!(chunks.concat(), text);
    }
}
