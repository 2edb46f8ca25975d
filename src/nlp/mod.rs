pub mod dictionary;
pub mod models;
pub mod tokenize;

pub use dictionary::Dictionary;
pub use tokenize::{ModelTokenizer, SimpleTokenizer, Tokenizer, WhitespaceTokenizer};

use crate::error::Result;

/// Which tokenizer to construct. `Model` is the only statistical-style one;
/// the other two are trivial splitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerKind {
    Simple,
    Whitespace,
    Model,
}

impl TokenizerKind {
    /// Whether the plain-text adapter should fuse split contractions back
    /// together after segmentation.
    pub fn is_model_based(self) -> bool {
        self == TokenizerKind::Model
    }
}

pub fn create_tokenizer(kind: TokenizerKind, language: &str) -> Result<Box<dyn Tokenizer>> {
    Ok(match kind {
        TokenizerKind::Simple => Box::new(SimpleTokenizer),
        TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer),
        TokenizerKind::Model => Box::new(ModelTokenizer::new(models::tokenizer_model(language)?)),
    })
}
