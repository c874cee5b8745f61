//! Language Name Utilities
//!
//! Maps ISO 639-3 language codes to display names for logging and generated
//! content. Covers the languages the service currently teaches plus a handful
//! of constructed languages that no ISO table carries.

/// Converts an ISO 639-3 code to its display name, if known.
pub fn language_name(iso_code: &str) -> Option<&'static str> {
    let name = match iso_code {
        "ara" => "Arabic",
        "cmn" => "Mandarin Chinese",
        "deu" => "German",
        "eng" => "English",
        "fin" => "Finnish",
        "fra" => "French",
        "hin" => "Hindi",
        "ita" => "Italian",
        "jpn" => "Japanese",
        "kor" => "Korean",
        "nld" => "Dutch",
        "pol" => "Polish",
        "por" => "Portuguese",
        "rus" => "Russian",
        "spa" => "Spanish",
        "swe" => "Swedish",
        "tha" => "Thai",
        "tur" => "Turkish",
        "ukr" => "Ukrainian",
        "vie" => "Vietnamese",
        "yue" => "Cantonese",
        // Constructed languages with real learner communities
        "klg" => "Klingon",
        "qya" => "Quenya",
        "sjn" => "Sindarin",
        "dth" => "Dothraki",
        "hva" => "High Valyrian",
        _ => return None,
    };
    Some(name)
}

/// Converts an ISO 639-3 code to a display name, falling back to the code
/// itself when it is unknown.
pub fn language_name_with_fallback(iso_code: &str) -> &str {
    language_name(iso_code).unwrap_or(iso_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(language_name("cmn"), Some("Mandarin Chinese"));
        assert_eq!(language_name("spa"), Some("Spanish"));
    }

    #[test]
    fn test_conlang_codes() {
        assert_eq!(language_name("klg"), Some("Klingon"));
        assert_eq!(language_name("hva"), Some("High Valyrian"));
    }

    #[test]
    fn test_unknown_code_returns_none() {
        assert_eq!(language_name("zzz"), None);
    }

    #[test]
    fn test_fallback_returns_code() {
        assert_eq!(language_name_with_fallback("zzz"), "zzz");
        assert_eq!(language_name_with_fallback("fin"), "Finnish");
    }
}
