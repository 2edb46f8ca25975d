use std::collections::BTreeMap;

/// Format-specific provenance properties attached to a token, in key order.
pub type TokenProperties = BTreeMap<String, String>;

/// A single unit of recognized text, as segmented by a format adapter or
/// tokenizer. Immutable once built.
#[derive(Debug, Clone)]
pub struct Token {
    text: String,
    properties: TokenProperties,
    last_on_line: bool,
    merged_from: Option<Box<(Token, Token)>>,
}

impl Token {
    /// A bare token with no provenance, as produced by the plain-text adapter.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            properties: TokenProperties::new(),
            last_on_line: false,
            merged_from: None,
        }
    }

    /// A token carrying format-specific properties, as produced by the
    /// markup adapter.
    pub fn with_properties(
        text: impl Into<String>,
        properties: TokenProperties,
        last_on_line: bool,
    ) -> Self {
        Self {
            text: text.into(),
            properties,
            last_on_line,
            merged_from: None,
        }
    }

    /// Merge a line-final hyphenated token with the token that follows it.
    /// The merged text is the first text minus its trailing hyphen plus the
    /// second text; the constituents' properties survive under the `_1` and
    /// `_2` suffixes.
    pub fn merged(first: Token, second: Token) -> Self {
        let mut text = first.text.clone();
        text.pop();
        text.push_str(&second.text);

        let mut properties = TokenProperties::new();
        for (key, value) in &first.properties {
            properties.insert(format!("{key}_1"), value.clone());
        }
        for (key, value) in &second.properties {
            properties.insert(format!("{key}_2"), value.clone());
        }

        Self {
            text,
            properties,
            last_on_line: false,
            merged_from: Some(Box::new((first, second))),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn id(&self) -> Option<&str> {
        self.property("id")
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> &TokenProperties {
        &self.properties
    }

    pub fn is_last_on_line(&self) -> bool {
        self.last_on_line
    }

    /// The two original tokens, when this token came out of a hyphen join.
    pub fn constituents(&self) -> Option<(&Token, &Token)> {
        self.merged_from.as_deref().map(|pair| (&pair.0, &pair.1))
    }
}

/// The capability shared by both page formats: an identifier plus the token
/// sequence in reading order. Downstream stages depend on nothing else.
pub trait OcrPage {
    fn page_id(&self) -> &str;
    fn tokens(&self) -> &[Token];
}
