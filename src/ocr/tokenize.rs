//! Splits raw OCR text into lines of whitespace-delimited tokens.
//!
//! Purely structural: nothing here looks at whether a token is numeric.
//! Blank lines are dropped entirely so that column positions downstream are
//! counted over real content only.

use std::path::Path;

use super::engine::TextRecognizer;
use crate::error::Result;

/// One OCR line, split into tokens.
pub type TokenLine = Vec<String>;

/// Line boundaries Tesseract may emit, including the form feed it appends
/// after each page.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Tokenises `text`, keeping top-to-bottom line order and left-to-right token order.
pub fn tokenize(text: &str) -> Vec<TokenLine> {
    text.split(is_line_break)
        .map(|raw| {
            raw.split_whitespace()
                .map(str::to_string)
                .collect::<TokenLine>()
        })
        .filter(|tokens| !tokens.is_empty())
        .collect()
}

/// Runs OCR on one image and tokenises the result.
pub fn ocr_lines<R>(recognizer: &R, image_path: &Path) -> Result<Vec<TokenLine>>
where
    R: TextRecognizer + ?Sized,
{
    let text = recognizer.recognize(image_path)?;
    Ok(tokenize(&text))
}
