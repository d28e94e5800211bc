use unicode_segmentation::UnicodeSegmentation;

/// Number of tokens shown on each side of a word when displaying context.
pub const CONTEXT_RADIUS: usize = 5;

/// A word in the source text. `start` and `end` are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub start: usize,
    pub end: usize,
    pub original_index: usize,
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '\''
}

/// Split text into words, keeping track of where each one came from.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (pos, grapheme) in text.grapheme_indices(true) {
        let ch = grapheme.chars().next().unwrap_or(' ');

        match (is_word_char(ch), word_start) {
            (true, None) => word_start = Some(pos),
            (false, Some(start)) => {
                push_token(&mut tokens, text, start, pos);
                word_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = word_start {
        push_token(&mut tokens, text, start, text.len());
    }

    tokens
}

fn push_token(tokens: &mut Vec<Token>, text: &str, start: usize, end: usize) {
    let original_index = tokens.len();
    tokens.push(Token {
        word: text[start..end].to_string(),
        start,
        end,
        original_index,
    });
}

/// Tokens within `radius` positions of `original_index`, clamped to the text.
pub fn context_window(tokens: &[Token], original_index: usize, radius: usize) -> &[Token] {
    if tokens.is_empty() {
        return tokens;
    }
    let start = original_index.saturating_sub(radius).min(tokens.len());
    let end = original_index
        .saturating_add(radius)
        .saturating_add(1)
        .min(tokens.len());
    &tokens[start..end]
}

/// Join a context window back into a single line for display.
pub fn render_context(window: &[Token]) -> String {
    let words: Vec<&str> = window.iter().map(|t| t.word.as_str()).collect();
    format!("...{}...", words.join(" "))
}

pub fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.word.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ,.;  ").is_empty());
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("a,b");
        assert_eq!(
            tokens,
            vec![
                Token {
                    word: "a".into(),
                    start: 0,
                    end: 1,
                    original_index: 0,
                },
                Token {
                    word: "b".into(),
                    start: 2,
                    end: 3,
                    original_index: 1,
                },
            ]
        );
    }

    #[test]
    fn test_hyphen_and_apostrophe_stay_in_word() {
        let tokens = tokenize("don't re-enter 42nd!");
        assert_eq!(words(&tokens), vec!["don't", "re-enter", "42nd"]);
        assert_eq!(tokens[2].start, 15);
        assert_eq!(tokens[2].end, 19);
    }

    #[test]
    fn test_multibyte_offsets_slice_cleanly() {
        let text = "café naïve";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.word);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "The quick, brown fox.\nJumps over\tthe lazy dog";
        assert_eq!(tokenize(text), tokenize(text));
    }

    #[test]
    fn test_context_window() {
        let tokens = tokenize("one two three four five six seven eight nine ten eleven twelve");
        assert_eq!(
            words(context_window(&tokens, 0, CONTEXT_RADIUS)),
            vec!["one", "two", "three", "four", "five", "six"]
        );
        assert_eq!(context_window(&tokens, 6, CONTEXT_RADIUS).len(), 11);
        assert_eq!(
            words(context_window(&tokens, 11, 2)),
            vec!["ten", "eleven", "twelve"]
        );
        assert!(context_window(&[], 3, CONTEXT_RADIUS).is_empty());
    }

    #[test]
    fn test_render_context() {
        let tokens = tokenize("I wil go");
        assert_eq!(render_context(&tokens), "...I wil go...");
    }

    #[test]
    fn test_is_capitalized() {
        assert!(is_capitalized("Hello"));
        assert!(!is_capitalized("hello"));
        assert!(!is_capitalized(""));
    }
}
