//! Text normalization and sentence splitting

/// Collapse all whitespace runs (spaces, newlines, tabs) to a single space
/// and trim the ends. Total function: empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into sentence-like units
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or
/// end-of-string. The terminal punctuation is consumed, so joined output
/// loses it; retain the delimiter here if exact reconstruction is ever
/// needed. Punctuation inside a token ("3.5", "v1.2") does not split.
///
/// Returns trimmed, non-empty sentences in original order. Text with no
/// terminal punctuation comes back as a single sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            match chars.peek() {
                Some(next) if next.is_whitespace() => {
                    push_sentence(&mut sentences, &mut current);
                }
                None => {
                    push_sentence(&mut sentences, &mut current);
                }
                _ => current.push(c),
            }
        } else {
            current.push(c);
        }
    }
    push_sentence(&mut sentences, &mut current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("a\n\n  b\t c"), "a b c");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let input = "  hello \n world  ";
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_split_strips_terminal_punctuation() {
        assert_eq!(split_sentences("Hello. World!"), vec!["Hello", "World"]);
    }

    #[test]
    fn test_split_no_punctuation_yields_whole_text() {
        assert_eq!(
            split_sentences("no punctuation here"),
            vec!["no punctuation here"]
        );
    }

    #[test]
    fn test_split_question_and_exclamation() {
        assert_eq!(
            split_sentences("Is it good? Yes! Very much."),
            vec!["Is it good", "Yes", "Very much"]
        );
    }

    #[test]
    fn test_split_keeps_mid_token_punctuation() {
        assert_eq!(
            split_sentences("Rated 4.5 stars. Great value"),
            vec!["Rated 4.5 stars", "Great value"]
        );
    }

    #[test]
    fn test_split_drops_empty_fragments() {
        assert_eq!(split_sentences("One.  . Two."), vec!["One", "Two"]);
        assert!(split_sentences("").is_empty());
    }
}
