pub mod engine;
pub mod extract;
pub mod preprocess;
pub mod setup;
pub mod tokenize;

pub use engine::{TesseractRecognizer, TextRecognizer};
pub use extract::extract_numbers;
pub use tokenize::{ocr_lines, TokenLine};
