use std::sync::Arc;

use crate::core::classifier::is_punct_char;
use crate::nlp::models::TokenizerModel;

/// Contraction suffixes the model tokenizer splits off, mirroring
/// treebank-style segmentation. The plain-text adapter later re-fuses them.
const SPLIT_SUFFIXES: [&str; 6] = ["'ll", "'s", "'ve", "'m", "'d", "'re"];

/// Segmentation capability: text in, ordered token strings out.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Splits on whitespace only.
#[derive(Debug, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Splits on character-class boundaries: runs of letters, runs of digits,
/// and runs of anything else each form a token.
#[derive(Debug, Default)]
pub struct SimpleTokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Letter,
    Digit,
    Other,
}

fn char_class(c: char) -> CharClass {
    if c.is_alphabetic() {
        CharClass::Letter
    } else if c.is_numeric() {
        CharClass::Digit
    } else {
        CharClass::Other
    }
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            let mut current = String::new();
            let mut current_class = None;
            for c in chunk.chars() {
                let class = char_class(c);
                if current_class != Some(class) && !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                current_class = Some(class);
                current.push(c);
            }
            if !current.is_empty() {
                tokens.push(current);
            }
        }
        tokens
    }
}

/// Model-driven tokenizer: splits edge punctuation into standalone tokens,
/// keeps dotted abbreviations from the language model intact, and splits
/// standard contraction suffixes off their stem.
pub struct ModelTokenizer {
    model: Arc<TokenizerModel>,
}

impl ModelTokenizer {
    pub fn new(model: Arc<TokenizerModel>) -> Self {
        Self { model }
    }

    pub fn language(&self) -> &str {
        self.model.language()
    }

    fn tokenize_chunk(&self, chunk: &str, tokens: &mut Vec<String>) {
        if self.model.is_abbreviation(chunk) {
            tokens.push(chunk.to_string());
            return;
        }

        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;
        let mut end = chars.len();

        while start < end && is_punct_char(chars[start]) {
            tokens.push(chars[start].to_string());
            start += 1;
        }

        let mut trailing = Vec::new();
        while end > start && is_punct_char(chars[end - 1]) {
            let remaining: String = chars[start..end].iter().collect();
            if self.model.is_abbreviation(&remaining) {
                break;
            }
            trailing.push(chars[end - 1].to_string());
            end -= 1;
        }

        if start < end {
            let core: String = chars[start..end].iter().collect();
            push_split_contractions(&core, tokens);
        }

        tokens.extend(trailing.into_iter().rev());
    }
}

fn push_split_contractions(core: &str, tokens: &mut Vec<String>) {
    let lower = core.to_lowercase();
    let char_count = core.chars().count();

    if lower.ends_with("n't") && char_count > 3 {
        let split = nth_char_boundary(core, char_count - 3);
        tokens.push(core[..split].to_string());
        tokens.push(core[split..].to_string());
        return;
    }

    for suffix in SPLIT_SUFFIXES {
        let suffix_len = suffix.chars().count();
        if lower.ends_with(suffix) && char_count > suffix_len {
            let split = nth_char_boundary(core, char_count - suffix_len);
            tokens.push(core[..split].to_string());
            tokens.push(core[split..].to_string());
            return;
        }
    }

    tokens.push(core.to_string());
}

fn nth_char_boundary(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

impl Tokenizer for ModelTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            self.tokenize_chunk(chunk, &mut tokens);
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::models::tokenizer_model;

    fn model() -> ModelTokenizer {
        ModelTokenizer::new(tokenizer_model("en").unwrap())
    }

    #[test]
    fn whitespace_splits_on_whitespace_only() {
        let tokens = WhitespaceTokenizer.tokenize("Hello  world,\nit's fine.");
        assert_eq!(tokens, vec!["Hello", "world,", "it's", "fine."]);
    }

    #[test]
    fn simple_splits_on_character_class() {
        let tokens = SimpleTokenizer.tokenize("don't stop4me");
        assert_eq!(tokens, vec!["don", "'", "t", "stop", "4", "me"]);
    }

    #[test]
    fn model_splits_edge_punctuation() {
        let tokens = model().tokenize("(hello) world.");
        assert_eq!(tokens, vec!["(", "hello", ")", "world", "."]);
    }

    #[test]
    fn model_splits_contractions() {
        let tokens = model().tokenize("don't you'll it's");
        assert_eq!(tokens, vec!["do", "n't", "you", "'ll", "it", "'s"]);
    }

    #[test]
    fn model_keeps_abbreviations_whole() {
        let tokens = model().tokenize("Mr. Smith etc.");
        assert_eq!(tokens, vec!["Mr.", "Smith", "etc."]);
    }

    #[test]
    fn model_keeps_numbers_whole() {
        let tokens = model().tokenize("$1.50 and 123.45");
        assert_eq!(tokens, vec!["$1.50", "and", "123.45"]);
    }

    #[test]
    fn model_leaves_interior_apostrophes_alone() {
        let tokens = model().tokenize("o'clock");
        assert_eq!(tokens, vec!["o'clock"]);
    }
}
