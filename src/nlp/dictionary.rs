use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Word-list dictionary: one correct word per line. Exposes the single
/// predicate the spelling pass needs.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Blank lines and `#` comment lines are ignored; entries are matched
    /// case-insensitively against already-lowercased lookups.
    pub fn parse(content: &str) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    #[cfg(test)]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_correct(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_word_list_skipping_comments() {
        let dictionary = Dictionary::parse("# header\nhello\n\nWorld\n  press  \n");
        assert_eq!(dictionary.len(), 3);
        assert!(dictionary.is_correct("hello"));
        assert!(dictionary.is_correct("world"));
        assert!(dictionary.is_correct("press"));
        assert!(!dictionary.is_correct("# header"));
    }

    #[test]
    fn unknown_words_are_incorrect() {
        let dictionary = Dictionary::parse("hello\n");
        assert!(!dictionary.is_correct("qwzrt"));
        assert!(!dictionary.is_correct(""));
    }
}
