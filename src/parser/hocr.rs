use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::core::model::{OcrPage, Token, TokenProperties};
use crate::error::{EvalError, Result};
use crate::parser::ParseOptions;

static PAGE: Lazy<Selector> = Lazy::new(|| Selector::parse(".ocr_page").unwrap());
static LINE: Lazy<Selector> = Lazy::new(|| Selector::parse(".ocr_line").unwrap());
static WORD: Lazy<Selector> = Lazy::new(|| Selector::parse(".ocrx_word").unwrap());
static META_SYSTEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="ocr-system"]"#).unwrap());
static META_CAPABILITIES: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="ocr-capabilities"]"#).unwrap());

/// A page read from an hOCR document: line/word markup in reading order,
/// plus the engine metadata declared in the document head.
#[derive(Debug, Clone)]
pub struct HocrPage {
    page_id: String,
    tokens: Vec<Token>,
    ocr_engine: Option<String>,
    ocr_capabilities: Vec<String>,
}

impl HocrPage {
    pub fn parse(html: &str) -> Result<Self> {
        Self::parse_with_options(html, ParseOptions::default())
    }

    /// Only the first `ocr_page` container is used when a document holds
    /// more than one page.
    pub fn parse_with_options(html: &str, options: ParseOptions) -> Result<Self> {
        let document = Html::parse_document(html);

        let ocr_engine = meta_content(&document, &META_SYSTEM);
        let ocr_capabilities = meta_content(&document, &META_CAPABILITIES)
            .map(|content| content.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        let page = document
            .select(&PAGE)
            .next()
            .ok_or_else(|| EvalError::Parse("no ocr_page element found".to_string()))?;
        let page_id = page.value().attr("id").unwrap_or_default().to_string();

        let mut tokens = Vec::new();
        for line in page.select(&LINE) {
            let words: Vec<ElementRef> = line.select(&WORD).collect();
            let last_index = words.len().saturating_sub(1);
            for (index, word) in words.iter().enumerate() {
                let text = word.text().collect::<String>().trim().to_string();
                let properties = word_properties(word)?;
                tokens.push(Token::with_properties(text, properties, index == last_index));
            }
        }

        if options.join_hyphenated_eol {
            tokens = join_hyphenated(tokens);
        }

        Ok(Self {
            page_id,
            tokens,
            ocr_engine,
            ocr_capabilities,
        })
    }

    pub fn ocr_engine(&self) -> Option<&str> {
        self.ocr_engine.as_deref()
    }

    pub fn ocr_capabilities(&self) -> &[String] {
        &self.ocr_capabilities
    }
}

impl OcrPage for HocrPage {
    fn page_id(&self) -> &str {
        &self.page_id
    }

    fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::to_string)
}

/// The `title` attribute encodes semicolon-separated `"name value"` pairs.
fn word_properties(word: &ElementRef) -> Result<TokenProperties> {
    let mut properties = TokenProperties::new();

    if let Some(id) = word.value().attr("id") {
        properties.insert("id".to_string(), id.to_string());
    }

    if let Some(title) = word.value().attr("title") {
        for part in title.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (name, value) = part.split_once(' ').ok_or_else(|| {
                EvalError::Parse(format!("malformed title property: {part:?}"))
            })?;
            properties.insert(name.to_string(), value.to_string());
        }
    }

    Ok(properties)
}

/// One pass, one token of lookahead: a line-final token ending in a hyphen
/// absorbs the following token. The lookahead is consumed, never replayed;
/// tokens left with empty text are dropped.
fn join_hyphenated(tokens: Vec<Token>) -> Vec<Token> {
    let mut joined = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        let token = if token.is_last_on_line() && token.text().ends_with('-') {
            match iter.next() {
                Some(next) => Token::merged(token, next),
                None => token,
            }
        } else {
            token
        };

        if token.text().is_empty() {
            continue;
        }
        joined.push(token);
    }

    joined
}
