use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Locale utilities for .lproj-style locale identifiers
///
/// This module provides functions for extracting locale identifiers from
/// localization folder paths and for validating and naming their ISO 639
/// language part (the subtag before any `-` or `_` region/script suffix).
/// The Base localization folder name used for development-language interfaces
pub const BASE_LOCALE: &str = "Base";

// @const: Locale component of an `<locale>.lproj` folder name
static LPROJ_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9\-_]*)\.lproj$").unwrap()
});

/// Language code type
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Extract the locale identifier from the `<locale>.lproj` component of a path
pub fn locale_from_path(path: &Path) -> Option<String> {
    path.components().rev().find_map(|component| {
        let name = component.as_os_str().to_str()?;
        LPROJ_REGEX.captures(name).map(|caps| caps[1].to_string())
    })
}

/// Whether a locale identifier names the Base localization folder
pub fn is_base_locale(locale: &str) -> bool {
    locale.eq_ignore_ascii_case(BASE_LOCALE)
}

/// The language part of a locale identifier, e.g. `pt` for `pt-BR`
pub fn language_part(locale: &str) -> &str {
    locale.split(&['-', '_'][..]).next().unwrap_or(locale)
}

/// Validate that the language part of a locale is a known ISO 639 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = language_part(code.trim()).to_lowercase();

    // Check for ISO 639-1 (2-letter) code
    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    }
    // Check for ISO 639-3 (3-letter) code
    else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part3);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Normalize the language part of a locale to ISO 639-3 (3-letter) format
pub fn normalize_to_part3(code: &str) -> Result<String> {
    let normalized_code = language_part(code.trim()).to_lowercase();

    // If it's a 2-letter code, convert to 3-letter
    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    }
    // If it's already a 3-letter code, validate it
    else if normalized_code.len() == 3 && Language::from_639_3(&normalized_code).is_some() {
        return Ok(normalized_code);
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two locale identifiers share the same language - used by tests
/// and external consumers
#[allow(dead_code)]
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    let normalized1 = match normalize_to_part3(code1) {
        Ok(n) => n,
        Err(_) => return false,
    };

    let normalized2 = match normalize_to_part3(code2) {
        Ok(n) => n,
        Err(_) => return false,
    };

    normalized1 == normalized2
}

/// Get the language name for a locale identifier
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part3(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Human-readable `Name (code)` label for log output
pub fn describe_locale(locale: &str) -> String {
    match get_language_name(locale) {
        Ok(name) => format!("{} ({})", name, locale),
        Err(_) => locale.to_string(),
    }
}
