use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

const MAX_LEADING_PUNCT_TO_REMOVE: usize = 1;
const MAX_TRAILING_PUNCT_TO_REMOVE: usize = 2;
const CLEAN_TOKEN_LEN_THRESHOLD: usize = 3;

static PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{P}$").unwrap());
static NUMBER_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Sc}?[.,/-]?(?:\p{N}+[.,/%-]?)+\p{Sc}?$").unwrap());
static ONE_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{L}$").unwrap());
static LEADING_PUNCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\p{{P}}{{0,{MAX_LEADING_PUNCT_TO_REMOVE}}}")).unwrap()
});
static TRAILING_PUNCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\p{{P}}{{0,{MAX_TRAILING_PUNCT_TO_REMOVE}}}$")).unwrap()
});

/// The closed set of mutually exclusive token quality categories. Every
/// token falls into exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Exactly one punctuation character.
    Punctuation,
    /// Number-shaped: amounts, dates, fractions, identifiers.
    NumberLike,
    /// Exactly one letter.
    SingleLetter,
    /// Contains a run of 4+ identical non-digit characters.
    RepeatedChars,
    /// No letters survive cleaning.
    NonAlphaGarbage,
    /// Cleaned length below the word threshold.
    CleanShort,
    /// Cleaned token is entirely letters.
    CleanAllAlpha,
    CleanOneNonAlpha,
    CleanTwoNonAlpha,
    CleanThreeOrMore,
}

/// Outcome of classifying one token: the category plus the cleaning
/// metadata it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub class: TokenClass,
    pub cleaned: String,
    pub cleaned_len: usize,
    pub non_alpha: usize,
}

/// Classify one token's text. An ordered, short-circuiting decision list:
/// the first matching rule wins. Input is NFC-normalized first so that
/// precomposed and decomposed forms classify identically.
pub fn classify(text: &str) -> Classification {
    let text: String = text.nfc().collect();
    let norm = text.to_lowercase();
    let cleaned = clean_token(&norm);
    let cleaned_len = cleaned.chars().count();
    let non_alpha = cleaned.chars().filter(|c| !c.is_alphabetic()).count();

    let class = if PUNCT.is_match(&text) {
        TokenClass::Punctuation
    } else if NUMBER_LIKE.is_match(&text) {
        TokenClass::NumberLike
    } else if ONE_LETTER.is_match(&text) {
        TokenClass::SingleLetter
    } else if has_repeated_run(&norm) {
        TokenClass::RepeatedChars
    } else if non_alpha == cleaned_len {
        TokenClass::NonAlphaGarbage
    } else if cleaned_len < CLEAN_TOKEN_LEN_THRESHOLD {
        TokenClass::CleanShort
    } else {
        match non_alpha {
            0 => TokenClass::CleanAllAlpha,
            1 => TokenClass::CleanOneNonAlpha,
            2 => TokenClass::CleanTwoNonAlpha,
            _ => TokenClass::CleanThreeOrMore,
        }
    };

    Classification {
        class,
        cleaned,
        cleaned_len,
        non_alpha,
    }
}

/// Strip at most 1 leading and 2 trailing punctuation characters. The
/// caller is expected to pass lowercased, normalized text.
pub fn clean_token(text: &str) -> String {
    let stripped = LEADING_PUNCT.replace(text, "");
    TRAILING_PUNCT.replace(&stripped, "").into_owned()
}

/// A run of 4 or more identical consecutive non-digit characters.
/// Expressed as a char scan: the regex crate has no backreferences.
fn has_repeated_run(text: &str) -> bool {
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if prev == Some(c) {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run >= 4 && !c.is_numeric() {
            return true;
        }
    }
    false
}

pub(crate) fn is_punct_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    PUNCT.is_match(c.encode_utf8(&mut buf))
}
