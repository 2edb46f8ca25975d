use serde::Serialize;

use crate::core::stats::PageStats;

/// The two derived quality ratios. A missing value means "undefined", never
/// NaN or a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityIndicators {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_quality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling_quality: Option<f64>,
}

/// Derive the quality indicators from one page's statistics. A page with no
/// tokens has no defined quality at all.
pub fn score_page(stats: &PageStats) -> Option<QualityIndicators> {
    if stats.token_count == 0 {
        return None;
    }

    let text_tokens = stats.token_count - stats.punctuation - stats.number_like;

    let ratio = |count: usize| {
        if text_tokens == 0 {
            None
        } else {
            Some(count as f64 / text_tokens as f64)
        }
    };

    Some(QualityIndicators {
        text_quality: ratio(stats.clean_all_alpha),
        spelling_quality: stats.correct_tokens.and_then(ratio),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(token_count: usize) -> PageStats {
        PageStats {
            page_id: "p1".to_string(),
            token_count,
            ..PageStats::default()
        }
    }

    #[test]
    fn empty_page_has_no_indicators() {
        assert!(score_page(&stats_with(0)).is_none());
    }

    #[test]
    fn text_quality_is_clean_fraction_of_text_tokens() {
        let stats = PageStats {
            token_count: 10,
            punctuation: 2,
            number_like: 1,
            clean_all_alpha: 5,
            ..stats_with(10)
        };
        let quality = score_page(&stats).unwrap();
        let tq = quality.text_quality.unwrap();
        assert!((tq - 5.0 / 7.0).abs() < 1e-9);
        assert!(quality.spelling_quality.is_none());
    }

    #[test]
    fn all_punctuation_page_has_undefined_text_quality() {
        let stats = PageStats {
            token_count: 4,
            punctuation: 4,
            ..stats_with(4)
        };
        let quality = score_page(&stats).unwrap();
        assert!(quality.text_quality.is_none());
        assert!(quality.spelling_quality.is_none());
    }

    #[test]
    fn spelling_quality_requires_dictionary_count() {
        let stats = PageStats {
            token_count: 8,
            clean_all_alpha: 6,
            correct_tokens: Some(4),
            ..stats_with(8)
        };
        let quality = score_page(&stats).unwrap();
        assert!((quality.spelling_quality.unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn defined_ratios_stay_in_unit_range() {
        let stats = PageStats {
            token_count: 9,
            punctuation: 1,
            number_like: 2,
            clean_all_alpha: 6,
            correct_tokens: Some(6),
            ..stats_with(9)
        };
        let quality = score_page(&stats).unwrap();
        for value in [quality.text_quality, quality.spelling_quality].into_iter().flatten() {
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
