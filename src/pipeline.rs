use std::fs;
use std::path::Path;

use crate::core::model::OcrPage;
use crate::core::quality::{score_page, QualityIndicators};
use crate::core::stats::{calculate_stats, count_correct_tokens, PageStats};
use crate::error::Result;
use crate::nlp::{create_tokenizer, Dictionary, Tokenizer, TokenizerKind};
use crate::parser::{HocrPage, TxtPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Txt,
    Hocr,
}

/// Everything one evaluation run shares across pages: the input format,
/// the tokenizer, and the optional dictionary. Pages are independent, so
/// one config can serve any number of worker threads.
pub struct EvalConfig {
    pub format: DocumentFormat,
    pub tokenizer: Box<dyn Tokenizer>,
    pub model_based: bool,
    pub dictionary: Option<Dictionary>,
}

impl EvalConfig {
    pub fn new(
        format: DocumentFormat,
        kind: TokenizerKind,
        language: &str,
        dictionary: Option<Dictionary>,
    ) -> Result<Self> {
        Ok(Self {
            format,
            tokenizer: create_tokenizer(kind, language)?,
            model_based: kind.is_model_based(),
            dictionary,
        })
    }
}

/// The outcome for one page: its statistics and, when defined, the two
/// quality ratios.
#[derive(Debug, Clone)]
pub struct PageScore {
    pub file_name: String,
    pub stats: PageStats,
    pub indicators: Option<QualityIndicators>,
}

/// Evaluate a single page file: parse, aggregate, optionally spell check,
/// score.
pub fn evaluate_page(config: &EvalConfig, path: &Path) -> Result<PageScore> {
    let source = fs::read_to_string(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let page: Box<dyn OcrPage> = match config.format {
        DocumentFormat::Hocr => Box::new(HocrPage::parse(&source)?),
        DocumentFormat::Txt => Box::new(TxtPage::parse(
            &source,
            &file_name,
            config.tokenizer.as_ref(),
            config.model_based,
        )),
    };

    let mut stats = calculate_stats(page.as_ref());
    if let Some(dictionary) = &config.dictionary {
        stats.correct_tokens = Some(count_correct_tokens(page.as_ref(), dictionary));
    }

    let indicators = score_page(&stats);
    Ok(PageScore {
        file_name,
        stats,
        indicators,
    })
}

/// The tab-separated score line for one page, or nothing when the page's
/// text quality is undefined. The spelling column appears only when a
/// dictionary pass ran.
pub fn format_score_line(score: &PageScore) -> Option<String> {
    let indicators = score.indicators?;
    let text_quality = indicators.text_quality?;

    Some(match indicators.spelling_quality {
        Some(spelling_quality) => format!(
            "{}\t{:.2}\t{:.2}",
            score.file_name, text_quality, spelling_quality
        ),
        None => format!("{}\t{:.2}", score.file_name, text_quality),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(
        token_count: usize,
        clean_all_alpha: usize,
        correct_tokens: Option<usize>,
    ) -> PageScore {
        let stats = PageStats {
            page_id: "page_1".to_string(),
            token_count,
            clean_all_alpha,
            correct_tokens,
            ..PageStats::default()
        };
        let indicators = score_page(&stats);
        PageScore {
            file_name: "page.hocr".to_string(),
            stats,
            indicators,
        }
    }

    #[test]
    fn line_has_both_ratios_with_dictionary() {
        let line = format_score_line(&score(10, 8, Some(5))).unwrap();
        assert_eq!(line, "page.hocr\t0.80\t0.50");
    }

    #[test]
    fn line_omits_spelling_without_dictionary() {
        let line = format_score_line(&score(10, 8, None)).unwrap();
        assert_eq!(line, "page.hocr\t0.80");
    }

    #[test]
    fn empty_page_produces_no_line() {
        assert!(format_score_line(&score(0, 0, None)).is_none());
    }
}
