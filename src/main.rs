use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use pagegauge::nlp::{Dictionary, TokenizerKind};
use pagegauge::pipeline::{evaluate_page, format_score_line, DocumentFormat, EvalConfig};

#[derive(Parser, Debug)]
#[command(name = "pagegauge")]
#[command(version, about = "Estimate how correctable an OCR'd page is", long_about = None)]
struct Cli {
    /// Format of the page OCR file(s)
    #[arg(short, long, value_enum, default_value_t = Format::Hocr)]
    format: Format,

    /// Dictionary word list used to spell check tokens
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Tokenizer used to segment txt input
    #[arg(short, long, value_enum, default_value_t = TokenizerChoice::Model)]
    tokenizer: TokenizerChoice,

    /// Language of the model-based tokenizer
    #[arg(short, long, value_enum, default_value_t = Language::En)]
    language: Language,

    /// Suppress informational output; only page scores are printed
    #[arg(short, long)]
    quiet: bool,

    /// Print full page statistics as JSON instead of score lines
    #[arg(short, long)]
    stats: bool,

    /// Page OCR file(s)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Format {
    Txt,
    Hocr,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum TokenizerChoice {
    Simple,
    Whitespace,
    Model,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Language {
    Da,
    De,
    En,
    Es,
    Nl,
    Pt,
    Se,
}

impl Language {
    fn code(self) -> &'static str {
        match self {
            Language::Da => "da",
            Language::De => "de",
            Language::En => "en",
            Language::Es => "es",
            Language::Nl => "nl",
            Language::Pt => "pt",
            Language::Se => "se",
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.quiet);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool) {
    let default_filter = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let format = match cli.format {
        Format::Txt => DocumentFormat::Txt,
        Format::Hocr => DocumentFormat::Hocr,
    };
    let kind = match cli.tokenizer {
        TokenizerChoice::Simple => TokenizerKind::Simple,
        TokenizerChoice::Whitespace => TokenizerKind::Whitespace,
        TokenizerChoice::Model => TokenizerKind::Model,
    };

    let dictionary = cli
        .dictionary
        .map(|path| {
            Dictionary::load(&path)
                .with_context(|| format!("failed to load dictionary: {}", path.display()))
        })
        .transpose()?;

    let config = EvalConfig::new(format, kind, cli.language.code(), dictionary)
        .context("failed to construct tokenizer")?;

    let results: Vec<_> = cli
        .inputs
        .par_iter()
        .map(|path| {
            tracing::info!("processing {:?}: {}", cli.format, path.display());
            (path, evaluate_page(&config, path))
        })
        .collect();

    let mut all_scored = true;
    for (path, result) in results {
        match result {
            Ok(score) => {
                if cli.stats {
                    println!("{}", serde_json::to_string(&score.stats)?);
                } else if let Some(line) = format_score_line(&score) {
                    println!("{line}");
                }
            }
            Err(err) => {
                all_scored = false;
                eprintln!("{}: {err}", path.display());
            }
        }
    }

    Ok(all_scored)
}
