//! Language detection for story titles.

use crate::error::Result;

/// Sentinel code returned when no confident guess exists. Never matches a
/// configured language, so undecidable stories fail the language filter.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Best-effort language detection over short text.
///
/// Detection may be wrong on short or ambiguous input; callers treat any
/// returned code as authoritative.
pub trait LanguageDetector: Send + Sync {
    /// Detect the language of `text` as an ISO 639-1 code, or
    /// [`UNKNOWN_LANGUAGE`] when the detector cannot decide.
    fn detect(&self, text: &str) -> Result<String>;
}

/// Detector backed by whatlang's trigram model.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String> {
        // whatlang reports ISO 639-3; the allow-list uses 639-1 codes.
        let code = whatlang::detect_lang(text)
            .and_then(|lang| isolang::Language::from_639_3(lang.code()))
            .and_then(|lang| lang.to_639_1())
            .unwrap_or(UNKNOWN_LANGUAGE);
        Ok(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english() {
        let detector = WhatlangDetector;
        let code = detector
            .detect("The quick brown fox jumps over the lazy dog")
            .unwrap();
        assert_eq!(code, "en");
    }

    #[test]
    fn detects_russian() {
        let detector = WhatlangDetector;
        let code = detector
            .detect("Сегодня в городе прошёл сильный дождь и похолодало")
            .unwrap();
        assert_eq!(code, "ru");
    }

    #[test]
    fn empty_text_is_unknown() {
        let detector = WhatlangDetector;
        assert_eq!(detector.detect("").unwrap(), UNKNOWN_LANGUAGE);
    }
}
