/*!
 * Tests for locale and language utility functions
 */

use std::path::Path;
use locsmith::language_utils::{
    describe_locale, get_language_name, is_base_locale, language_codes_match, language_part,
    locale_from_path, normalize_to_part3, validate_language_code, LanguageCodeType,
};

/// Test locale extraction from .lproj paths
#[test]
fn test_locale_from_path_withLprojPaths_shouldExtractLocale() {
    assert_eq!(
        locale_from_path(Path::new("/project/en.lproj/Localizable.strings")),
        Some("en".to_string())
    );
    assert_eq!(
        locale_from_path(Path::new("App/de-AT.lproj/Main.strings")),
        Some("de-AT".to_string())
    );
    assert_eq!(
        locale_from_path(Path::new("App/zh_Hans.lproj/Main.strings")),
        Some("zh_Hans".to_string())
    );
    assert_eq!(
        locale_from_path(Path::new("App/Base.lproj/Main.storyboard")),
        Some("Base".to_string())
    );
}

/// Test locale extraction on paths without any .lproj component
#[test]
fn test_locale_from_path_withoutLprojComponent_shouldReturnNone() {
    assert_eq!(locale_from_path(Path::new("/project/Localizable.strings")), None);
    assert_eq!(locale_from_path(Path::new("notes.txt")), None);
}

/// Test recognition of the Base pseudo locale
#[test]
fn test_is_base_locale_withVariousSpellings_shouldMatchCaseInsensitively() {
    assert!(is_base_locale("Base"));
    assert!(is_base_locale("base"));
    assert!(is_base_locale("BASE"));
    assert!(!is_base_locale("en"));
}

/// Test splitting the language part off regioned locales
#[test]
fn test_language_part_withRegionedLocales_shouldReturnLanguage() {
    assert_eq!(language_part("pt-BR"), "pt");
    assert_eq!(language_part("zh_Hans"), "zh");
    assert_eq!(language_part("en"), "en");
}

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    // ISO 639-1 tests
    assert!(matches!(validate_language_code("en").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("fr").unwrap(), LanguageCodeType::Part1));

    // ISO 639-3 tests
    assert!(matches!(validate_language_code("eng").unwrap(), LanguageCodeType::Part3));
    assert!(matches!(validate_language_code("deu").unwrap(), LanguageCodeType::Part3));

    // Regioned locales validate through their language part
    assert!(matches!(validate_language_code("pt-BR").unwrap(), LanguageCodeType::Part1));

    // Whitespace and case tests
    assert!(matches!(validate_language_code(" EN ").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("ENG").unwrap(), LanguageCodeType::Part3));

    // Invalid codes
    assert!(validate_language_code("xyz").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("e").is_err());
}

/// Test normalization of language codes to ISO 639-3 format
#[test]
fn test_normalize_to_part3_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part3("en").unwrap(), "eng");
    assert_eq!(normalize_to_part3("fr").unwrap(), "fra");
    assert_eq!(normalize_to_part3("de").unwrap(), "deu");
    assert_eq!(normalize_to_part3("eng").unwrap(), "eng");

    // Case insensitivity
    assert_eq!(normalize_to_part3("EN").unwrap(), "eng");

    // Regioned locales normalize through their language part
    assert_eq!(normalize_to_part3("fr-CA").unwrap(), "fra");

    // Whitespace
    assert_eq!(normalize_to_part3(" en ").unwrap(), "eng");
}

/// Test matching of different language code formats
#[test]
fn test_language_codes_match_withMatchingCodes_shouldReturnTrue() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("eng", "en"));
    assert!(language_codes_match("fr", "fra"));

    // Case insensitivity
    assert!(language_codes_match("EN", "eng"));

    // Regioned locales match on their language part
    assert!(language_codes_match("pt-BR", "pt"));

    // Non-matches
    assert!(!language_codes_match("en", "fra"));
    assert!(!language_codes_match("en", "xx"));
}

/// Test retrieval of language names from codes
#[test]
fn test_get_language_name_withValidCodes_shouldReturnCorrectName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("de").unwrap(), "German");

    // Invalid codes
    assert!(get_language_name("xyz").is_err());
}

/// Test the human-readable locale label used in log output
#[test]
fn test_describe_locale_withKnownAndUnknownLocales_shouldFormatLabel() {
    assert_eq!(describe_locale("de"), "German (de)");
    assert_eq!(describe_locale("pt-BR"), "Portuguese (pt-BR)");

    // Unknown locales fall back to the raw identifier
    assert_eq!(describe_locale("Base"), "Base");
}
