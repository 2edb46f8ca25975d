pub mod hocr;
pub mod txt;

pub use hocr::HocrPage;
pub use txt::TxtPage;

/// Options shared by the two document adapters. Hyphen joining is on by
/// default; contraction fusing is only meaningful for the plain-text
/// adapter with a model-based tokenizer.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub join_hyphenated_eol: bool,
    pub fuse_contractions: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            join_hyphenated_eol: true,
            fuse_contractions: false,
        }
    }
}
