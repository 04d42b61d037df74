use regex::Regex;
use std::sync::LazyLock;

use crate::log;

/// First run of ASCII digits inside a token. Unicode decimal digits are
/// deliberately not matched; Tesseract's `eng` model never emits them.
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("number pattern is valid"));

/// Extracts one integer per token that contains a digit run, in token order.
///
/// Only the first run in a token counts: `12%` gives 12 and `A1B2` gives 1.
/// Two values fused into one token by OCR are therefore never split apart.
/// Tokens without digits contribute nothing. A run too large for `u32` is
/// clamped to `u32::MAX` so later columns keep their positions.
pub fn extract_numbers<S: AsRef<str>>(tokens: &[S]) -> Vec<u32> {
    let mut numbers = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        let Some(m) = NUMBER_RE.find(token) else {
            continue;
        };
        let value = m.as_str().parse::<u32>().unwrap_or_else(|e| {
            log(&format!("Clamping oversized number in token '{}': {}", token, e));
            u32::MAX
        });
        numbers.push(value);
    }

    numbers
}
