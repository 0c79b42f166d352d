/*!
 * Tests for application configuration functionality
 */

use std::str::FromStr;
use locsmith::app_config::{Config, LogLevel, TranslationConfig, TranslationProvider};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    // Test default values
    assert_eq!(config.path, ".");
    assert_eq!(config.source_locale, "en");
    assert_eq!(config.localizable_name, "Localizable");
    assert!(!config.override_values);
    assert_eq!(config.translation.provider, TranslationProvider::Microsoft);
    assert_eq!(config.translation.timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Info);

    // Command defaults
    assert!(!config.code.additive);
    assert!(!config.code.default_to_keys);
    assert!(!config.code.sort_by_keys);
    assert!(!config.code.unstripped);
    assert_eq!(config.code.extractor_timeout_secs, 120);
    assert!(!config.interfaces.default_to_base);
    assert!(!config.interfaces.ignore_empty_values);
    assert!(config.normalize.harmonize_with_source);
    assert!(config.normalize.prevent_duplicate_keys);
    assert!(!config.normalize.sort_by_keys);
    assert!(config.normalize.warn_empty_values);
    assert!(config.lint.duplicate_keys);
    assert!(config.lint.empty_values);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    // Start with a valid config
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Invalid source locale
    config.source_locale = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_locale = "en".to_string();

    // Regioned source locales validate through their language part
    config.source_locale = "pt-BR".to_string();
    assert!(config.validate().is_ok());
    config.source_locale = "en".to_string();

    // Empty localizable file name
    config.localizable_name = "  ".to_string();
    assert!(config.validate().is_err());
    config.localizable_name = "Localizable".to_string();

    // Invalid endpoint override
    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.translation.endpoint = "https://api-free.deepl.com".to_string();
    assert!(config.validate().is_ok());
}

/// Test partial JSON configs fall back to defaults for missing fields
#[test]
fn test_config_deserialization_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "path": "/tmp/project",
        "code": { "additive": true },
        "translation": { "provider": "deepl", "api_key": "secret" }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.path, "/tmp/project");
    assert!(config.code.additive);
    assert!(!config.code.default_to_keys);
    assert_eq!(config.source_locale, "en");
    assert_eq!(config.translation.provider, TranslationProvider::DeepL);
    assert_eq!(config.translation.api_key, "secret");
    assert_eq!(config.translation.timeout_secs, 30);
    assert!(config.normalize.harmonize_with_source);
}

/// Test provider name round trips through Display and FromStr
#[test]
fn test_translation_provider_nameRoundTrip_shouldMatch() {
    assert_eq!(TranslationProvider::Microsoft.to_string(), "microsoft");
    assert_eq!(TranslationProvider::DeepL.to_string(), "deepl");

    assert_eq!(
        TranslationProvider::from_str("microsoft").unwrap(),
        TranslationProvider::Microsoft
    );
    assert_eq!(
        TranslationProvider::from_str("DeepL").unwrap(),
        TranslationProvider::DeepL
    );
    assert!(TranslationProvider::from_str("google").is_err());

    assert_eq!(
        TranslationProvider::Microsoft.display_name(),
        "Microsoft Translator"
    );
    assert_eq!(TranslationProvider::DeepL.display_name(), "DeepL");
}

/// Test endpoint fallback per provider
#[test]
fn test_get_endpoint_withNoOverride_shouldFallBackPerProvider() {
    let mut translation = TranslationConfig::default();

    translation.provider = TranslationProvider::Microsoft;
    assert_eq!(
        translation.get_endpoint(),
        "https://api.cognitive.microsofttranslator.com"
    );

    translation.provider = TranslationProvider::DeepL;
    assert_eq!(translation.get_endpoint(), "https://api.deepl.com");

    translation.endpoint = "https://api-free.deepl.com".to_string();
    assert_eq!(translation.get_endpoint(), "https://api-free.deepl.com");
}

/// Test log level deserialization from lowercase names
#[test]
fn test_log_level_deserialization_withLowercaseNames_shouldParse() {
    let config: Config = serde_json::from_str(r#"{ "log_level": "debug" }"#).unwrap();
    assert_eq!(config.log_level, LogLevel::Debug);

    let config: Config = serde_json::from_str(r#"{ "log_level": "trace" }"#).unwrap();
    assert_eq!(config.log_level, LogLevel::Trace);
}

/// Test that a config serializes and deserializes without losing fields
#[test]
fn test_config_serialization_roundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.source_locale = "de".to_string();
    config.override_values = true;
    config.code.custom_function = Some("MyLocalizedString".to_string());
    config.translation.provider = TranslationProvider::DeepL;
    config.translation.region = "westeurope".to_string();

    let json = serde_json::to_string_pretty(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.source_locale, "de");
    assert!(restored.override_values);
    assert_eq!(
        restored.code.custom_function.as_deref(),
        Some("MyLocalizedString")
    );
    assert_eq!(restored.translation.provider, TranslationProvider::DeepL);
    assert_eq!(restored.translation.region, "westeurope");
}
