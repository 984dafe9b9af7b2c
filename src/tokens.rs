// Transient whitespace tokenization with byte spans. Detection and the
// address rewriter both work over these tokens so replacement spans can be
// stitched back into the original text without disturbing anything else.

/// A whitespace-delimited word with its byte span in the source text.
#[derive(Debug, Clone)]
pub struct Word {
    pub text: String,
    pub lower: String,
    pub start: usize,
    pub end: usize,
}

impl Word {
    /// Lower-cased form with trailing sentence punctuation removed.
    pub fn core_lower(&self) -> &str {
        strip_trailing_punct(&self.lower).0
    }

    /// Original-cased form with trailing sentence punctuation removed.
    pub fn core_text(&self) -> &str {
        strip_trailing_punct(&self.text).0
    }

    /// End byte offset of the word excluding trailing punctuation.
    pub fn core_end(&self) -> usize {
        let (_, punct) = strip_trailing_punct(&self.text);
        self.end - punct.len()
    }

    /// True when the word carries no trailing punctuation.
    pub fn is_clean(&self) -> bool {
        self.core_end() == self.end
    }
}

/// Split text into words, recording byte offsets.
pub fn split_words(text: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut end = start;
        while let Some(&(i, ch)) = chars.peek() {
            if ch.is_whitespace() {
                break;
            }
            end = i + ch.len_utf8();
            chars.next();
        }
        let t = &text[start..end];
        words.push(Word {
            text: t.to_string(),
            lower: t.to_lowercase(),
            start,
            end,
        });
    }
    words
}

/// Strip trailing sentence punctuation from a word, returning (clean, punct).
pub fn strip_trailing_punct(w: &str) -> (&str, &str) {
    let trimmed = w.trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'));
    let punct = &w[trimmed.len()..];
    (trimmed, punct)
}
