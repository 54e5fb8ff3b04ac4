//! Canned stand-ins for the recognition and translation engines.
//!
//! Everything here is a pure function of its inputs and the supplied
//! generation time, so a real engine can replace either module without
//! touching the HTTP layer.

pub mod ocr;
pub mod translation;

pub use ocr::{OcrStats, RecognizedText, recognize};
pub use translation::translate;
