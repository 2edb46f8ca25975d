use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::{OcrPage, Token};
use crate::nlp::tokenize::Tokenizer;
use crate::parser::ParseOptions;

/// A letter, a hyphen, a line break, a letter: rewrite to join the two
/// letter runs. Applied before tokenization, where word boundaries are not
/// yet known.
static HYPHEN_EOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(\S*\p{L})-\n(\p{L}\S*)\s*").unwrap());

/// The closed set of contraction suffixes a model-based tokenizer splits
/// off, re-fused after segmentation.
const CONTRACTIONS: [&str; 7] = ["'ll", "'s", "n't", "'ve", "'m", "'d", "'re"];

/// A page read from raw OCR text, segmented by an injected tokenizer.
#[derive(Debug, Clone)]
pub struct TxtPage {
    page_id: String,
    tokens: Vec<Token>,
}

impl TxtPage {
    /// `model_based` marks the tokenizer as statistical; only then are
    /// split contractions fused back together.
    pub fn parse(
        text: &str,
        page_id: &str,
        tokenizer: &dyn Tokenizer,
        model_based: bool,
    ) -> Self {
        let options = ParseOptions {
            join_hyphenated_eol: true,
            fuse_contractions: model_based,
        };
        Self::parse_with_options(text, page_id, tokenizer, model_based, options)
    }

    pub fn parse_with_options(
        text: &str,
        page_id: &str,
        tokenizer: &dyn Tokenizer,
        model_based: bool,
        options: ParseOptions,
    ) -> Self {
        if options.fuse_contractions && !model_based {
            tracing::warn!("contraction fusing requires a model-based tokenizer, skipping");
        }

        let text = if options.join_hyphenated_eol {
            HYPHEN_EOL.replace_all(text, "${1}${2}\n")
        } else {
            std::borrow::Cow::Borrowed(text)
        };

        let mut token_texts = tokenizer.tokenize(&text);
        if options.fuse_contractions && model_based {
            token_texts = fuse_contractions(token_texts);
        }

        Self {
            page_id: page_id.to_string(),
            tokens: token_texts.into_iter().map(Token::plain).collect(),
        }
    }
}

impl OcrPage for TxtPage {
    fn page_id(&self) -> &str {
        &self.page_id
    }

    fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// One pass, one token of lookahead: a token followed by a contraction
/// suffix absorbs it, and scanning resumes after the fused pair.
fn fuse_contractions(tokens: Vec<String>) -> Vec<String> {
    let mut fused = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter();
    let mut lookahead: Option<String> = None;

    loop {
        let mut token = match lookahead.take().or_else(|| iter.next()) {
            Some(token) => token,
            None => break,
        };

        match iter.next() {
            Some(next) if CONTRACTIONS.contains(&next.to_lowercase().as_str()) => {
                token.push_str(&next);
            }
            next => lookahead = next,
        }

        fused.push(token);
    }

    fused
}
