//! Sentence splitting and word-safe truncation.

/// Split text into sentences on `.`, `!` or `?` followed by whitespace.
///
/// Sentences keep their terminal punctuation and are trimmed; empty pieces
/// are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?' | '。' | '！' | '？') {
            let at_boundary = match chars.peek() {
                Some((_, next)) => next.is_whitespace(),
                None => true,
            };
            if at_boundary {
                let end = i + c.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// Cut text to at most `max_chars` characters without splitting a word.
///
/// Returns the text unchanged when it fits. Otherwise the result ends at the
/// last whitespace boundary inside the limit; a first word longer than the
/// limit yields an empty string.
pub fn truncate_at_word(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    // Byte offset of the first character past the limit.
    let limit = text
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    // If the character right after the cut is whitespace, the whole prefix is
    // made of complete words.
    let next_is_space = text[limit..]
        .chars()
        .next()
        .map(char::is_whitespace)
        .unwrap_or(true);
    if next_is_space {
        return text[..limit].trim_end().to_string();
    }

    match text[..limit].rfind(char::is_whitespace) {
        Some(cut) => text[..cut].trim_end().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let text = "First one. Second one! Third? Trailing fragment";
        assert_eq!(
            split_sentences(text),
            vec!["First one.", "Second one!", "Third?", "Trailing fragment"]
        );
    }

    #[test]
    fn test_split_keeps_decimals() {
        let text = "Costs rose 2.5 percent. Then fell.";
        assert_eq!(
            split_sentences(text),
            vec!["Costs rose 2.5 percent.", "Then fell."]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_truncate_fits() {
        assert_eq!(truncate_at_word("short text", 50), "short text");
    }

    #[test]
    fn test_truncate_at_word_boundary() {
        let result = truncate_at_word("alpha beta gamma delta", 13);
        assert_eq!(result, "alpha beta");
        assert!(result.chars().count() <= 13);
    }

    #[test]
    fn test_truncate_exact_word_end() {
        assert_eq!(truncate_at_word("alpha beta gamma", 10), "alpha beta");
    }

    #[test]
    fn test_truncate_single_long_word() {
        assert_eq!(truncate_at_word("supercalifragilistic", 5), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        let result = truncate_at_word("café crème brûlée", 11);
        assert_eq!(result, "café crème");
    }
}
