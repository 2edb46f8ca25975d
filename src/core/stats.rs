use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::core::classifier::{self, TokenClass};
use crate::core::model::OcrPage;
use crate::nlp::dictionary::Dictionary;

/// Per-page token statistics. Built in one pass by [`calculate_stats`];
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStats {
    pub page_id: String,
    pub token_count: usize,
    pub punctuation: usize,
    pub number_like: usize,
    pub single_letter: usize,
    pub repeated_chars: usize,
    pub non_alpha_garbage: usize,
    pub clean_short: usize,
    pub clean_all_alpha: usize,
    pub clean_one_non_alpha: usize,
    pub clean_two_non_alpha: usize,
    pub clean_three_or_more: usize,
    /// Dictionary pass result; absent unless a dictionary was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_tokens: Option<usize>,
}

impl PageStats {
    /// Sum over all categories; always equals `token_count`.
    pub fn category_total(&self) -> usize {
        self.punctuation
            + self.number_like
            + self.single_letter
            + self.repeated_chars
            + self.non_alpha_garbage
            + self.clean_short
            + self.clean_all_alpha
            + self.clean_one_non_alpha
            + self.clean_two_non_alpha
            + self.clean_three_or_more
    }
}

/// Single linear pass: classify every token and accumulate the category
/// counters.
pub fn calculate_stats(page: &dyn OcrPage) -> PageStats {
    let mut stats = PageStats {
        page_id: page.page_id().to_string(),
        ..PageStats::default()
    };

    for token in page.tokens() {
        stats.token_count += 1;
        let counter = match classifier::classify(token.text()).class {
            TokenClass::Punctuation => &mut stats.punctuation,
            TokenClass::NumberLike => &mut stats.number_like,
            TokenClass::SingleLetter => &mut stats.single_letter,
            TokenClass::RepeatedChars => &mut stats.repeated_chars,
            TokenClass::NonAlphaGarbage => &mut stats.non_alpha_garbage,
            TokenClass::CleanShort => &mut stats.clean_short,
            TokenClass::CleanAllAlpha => &mut stats.clean_all_alpha,
            TokenClass::CleanOneNonAlpha => &mut stats.clean_one_non_alpha,
            TokenClass::CleanTwoNonAlpha => &mut stats.clean_two_non_alpha,
            TokenClass::CleanThreeOrMore => &mut stats.clean_three_or_more,
        };
        *counter += 1;
    }

    stats
}

/// Second pass: tokens whose cleaned, lowercased text the dictionary
/// accepts. Order-independent of [`calculate_stats`].
pub fn count_correct_tokens(page: &dyn OcrPage, dictionary: &Dictionary) -> usize {
    page.tokens()
        .iter()
        .filter(|token| {
            let norm: String = token.text().nfc().collect::<String>().to_lowercase();
            dictionary.is_correct(&classifier::clean_token(&norm))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Token;

    struct TestPage {
        tokens: Vec<Token>,
    }

    impl TestPage {
        fn of(words: &[&str]) -> Self {
            Self {
                tokens: words.iter().copied().map(Token::plain).collect(),
            }
        }
    }

    impl OcrPage for TestPage {
        fn page_id(&self) -> &str {
            "test-page"
        }

        fn tokens(&self) -> &[Token] {
            &self.tokens
        }
    }

    #[test]
    fn categories_sum_to_token_count() {
        let page = TestPage::of(&[
            "Hello", "world", ".", "123", "a", "xxxx", "--", "ab", "it's", "qu!et,ly?",
        ]);
        let stats = calculate_stats(&page);
        assert_eq!(stats.token_count, 10);
        assert_eq!(stats.category_total(), stats.token_count);
    }

    #[test]
    fn counts_land_in_expected_buckets() {
        let page = TestPage::of(&["Hello", ".", "123", "a", "xxxx", "--", "ab", "it's"]);
        let stats = calculate_stats(&page);
        assert_eq!(stats.clean_all_alpha, 1);
        assert_eq!(stats.punctuation, 1);
        assert_eq!(stats.number_like, 1);
        assert_eq!(stats.single_letter, 1);
        assert_eq!(stats.repeated_chars, 1);
        assert_eq!(stats.non_alpha_garbage, 1);
        assert_eq!(stats.clean_short, 1);
        assert_eq!(stats.clean_one_non_alpha, 1);
    }

    #[test]
    fn empty_page_has_zero_counts() {
        let page = TestPage::of(&[]);
        let stats = calculate_stats(&page);
        assert_eq!(stats.token_count, 0);
        assert_eq!(stats.category_total(), 0);
        assert!(stats.correct_tokens.is_none());
    }

    #[test]
    fn dictionary_pass_counts_cleaned_matches() {
        let dictionary = Dictionary::from_words(["hello", "world"]);
        let page = TestPage::of(&["Hello", "\"world\",", "qwzrt", "."]);
        assert_eq!(count_correct_tokens(&page, &dictionary), 2);
    }
}
