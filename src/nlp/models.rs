use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::error::{EvalError, Result};

/// Per-language tokenizer model data, embedded in the binary.
static MODEL_DATA: &[(&str, &str)] = &[
    ("da", include_str!("../../resources/models/da.txt")),
    ("de", include_str!("../../resources/models/de.txt")),
    ("en", include_str!("../../resources/models/en.txt")),
    ("es", include_str!("../../resources/models/es.txt")),
    ("nl", include_str!("../../resources/models/nl.txt")),
    ("pt", include_str!("../../resources/models/pt.txt")),
    ("se", include_str!("../../resources/models/se.txt")),
];

static TOKENIZER_MODELS: Lazy<Mutex<HashMap<String, Arc<TokenizerModel>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Language-specific data backing the model tokenizer: the set of dotted
/// abbreviations that must not lose their trailing period.
#[derive(Debug)]
pub struct TokenizerModel {
    language: String,
    abbreviations: HashSet<String>,
}

impl TokenizerModel {
    fn parse(language: &str, data: &str) -> Self {
        let abbreviations = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self {
            language: language.to_string(),
            abbreviations,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn is_abbreviation(&self, candidate: &str) -> bool {
        self.abbreviations.contains(&candidate.to_lowercase())
    }
}

/// Fetch the tokenizer model for a language, loading it at most once per
/// process. Concurrent first callers serialize on the cache lock: one of
/// them loads, the rest observe the same cached instance.
pub fn tokenizer_model(language: &str) -> Result<Arc<TokenizerModel>> {
    let mut models = TOKENIZER_MODELS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(model) = models.get(language) {
        return Ok(Arc::clone(model));
    }

    tracing::debug!("loading tokenizer model for '{language}'");
    let data = MODEL_DATA
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, data)| *data)
        .ok_or_else(|| {
            EvalError::UnsupportedLanguage(format!("no tokenizer model for language: {language}"))
        })?;

    let model = Arc::new(TokenizerModel::parse(language, data));
    models.insert(language.to_string(), Arc::clone(&model));
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_model_once_per_language() {
        let first = tokenizer_model("en").unwrap();
        let second = tokenizer_model("en").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.language(), "en");
    }

    #[test]
    fn concurrent_first_use_shares_one_instance() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| tokenizer_model("de").unwrap()))
            .collect();
        let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for model in &models[1..] {
            assert!(Arc::ptr_eq(&models[0], model));
        }
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = tokenizer_model("xx").unwrap_err();
        assert!(matches!(err, EvalError::UnsupportedLanguage(_)));
    }

    #[test]
    fn english_model_knows_common_abbreviations() {
        let model = tokenizer_model("en").unwrap();
        assert!(model.is_abbreviation("etc."));
        assert!(model.is_abbreviation("Mr."));
        assert!(!model.is_abbreviation("word."));
    }
}
