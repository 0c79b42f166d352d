use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and merging configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Project root to scan for strings files and sources
    #[serde(default = "default_path")]
    pub path: String,

    /// Source (development) locale code (ISO 639)
    #[serde(default = "default_source_locale")]
    pub source_locale: String,

    /// Base name of the main strings file, without extension
    #[serde(default = "default_localizable_name")]
    pub localizable_name: String,

    /// Replace existing values when merging or translating
    #[serde(default)]
    pub override_values: bool,

    /// Code extraction and merge settings
    #[serde(default)]
    pub code: CodeConfig,

    /// Interface extraction and merge settings
    #[serde(default)]
    pub interfaces: InterfacesConfig,

    /// Normalization settings
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Lint checks
    #[serde(default)]
    pub lint: LintConfig,

    /// Machine translation settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Microsoft Translator
    #[default]
    Microsoft,
    // @provider: DeepL
    DeepL,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Microsoft => "Microsoft Translator",
            Self::DeepL => "DeepL",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Microsoft => "microsoft".to_string(),
            Self::DeepL => "deepl".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "microsoft" => Ok(Self::Microsoft),
            "deepl" => Ok(Self::DeepL),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Settings for the `code` command
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CodeConfig {
    /// Use the key itself instead of an empty value for new keys
    #[serde(default)]
    pub default_to_keys: bool,

    /// Keep keys that are no longer referenced from code
    #[serde(default)]
    pub additive: bool,

    /// Replace existing comments with the extracted ones
    #[serde(default)]
    pub override_comments: bool,

    /// Use `xcrun extractLocStrings` instead of `genstrings`
    #[serde(default)]
    pub use_extract_loc_strings: bool,

    /// Sort entries by key after merging
    #[serde(default)]
    pub sort_by_keys: bool,

    /// Keep the original whitespace of the target files
    #[serde(default)]
    pub unstripped: bool,

    /// Custom localization routine name passed to the extractor
    #[serde(default)]
    pub custom_function: Option<String>,

    /// Extractor timeout in seconds
    #[serde(default = "default_extractor_timeout_secs")]
    pub extractor_timeout_secs: u64,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            default_to_keys: false,
            additive: false,
            override_comments: false,
            use_extract_loc_strings: false,
            sort_by_keys: false,
            unstripped: false,
            custom_function: None,
            extractor_timeout_secs: default_extractor_timeout_secs(),
        }
    }
}

/// Settings for the `interfaces` command
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InterfacesConfig {
    /// Use the Base interface value instead of an empty value for new keys
    #[serde(default)]
    pub default_to_base: bool,

    /// Keep the original whitespace of the target files
    #[serde(default)]
    pub unstripped: bool,

    /// Never overwrite an existing value with an empty extracted one
    #[serde(default)]
    pub ignore_empty_values: bool,

    /// Extractor timeout in seconds
    #[serde(default = "default_extractor_timeout_secs")]
    pub extractor_timeout_secs: u64,
}

impl Default for InterfacesConfig {
    fn default() -> Self {
        Self {
            default_to_base: false,
            unstripped: false,
            ignore_empty_values: false,
            extractor_timeout_secs: default_extractor_timeout_secs(),
        }
    }
}

/// Settings for the `normalize` command
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NormalizeConfig {
    /// Rewrite target keys to match the source locale's keys
    #[serde(default = "default_true")]
    pub harmonize_with_source: bool,

    /// Drop all but the first entry of every duplicated key
    #[serde(default = "default_true")]
    pub prevent_duplicate_keys: bool,

    /// Sort entries by key
    #[serde(default)]
    pub sort_by_keys: bool,

    /// Log a warning for entries with empty values
    #[serde(default = "default_true")]
    pub warn_empty_values: bool,

    /// Keep the original whitespace of the files
    #[serde(default)]
    pub unstripped: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            harmonize_with_source: true,
            prevent_duplicate_keys: true,
            sort_by_keys: false,
            warn_empty_values: true,
            unstripped: false,
        }
    }
}

/// Settings for the `lint` command
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LintConfig {
    /// Report keys that appear more than once in a file
    #[serde(default = "default_true")]
    pub duplicate_keys: bool,

    /// Report entries whose value is empty
    #[serde(default = "default_true")]
    pub empty_values: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            duplicate_keys: true,
            empty_values: true,
        }
    }
}

/// Machine translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    // @field: API key / subscription key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Resource region, Microsoft Translator only
    #[serde(default = "String::new")]
    pub region: String,

    // @field: Service URL override, empty selects the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            api_key: String::new(),
            region: String::new(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::Microsoft => default_microsoft_endpoint(),
            TranslationProvider::DeepL => default_deepl_endpoint(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_path() -> String {
    ".".to_string()
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_localizable_name() -> String {
    "Localizable".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_extractor_timeout_secs() -> u64 {
    120 // genstrings and ibtool can crawl large trees
}

fn default_microsoft_endpoint() -> String {
    "https://api.cognitive.microsofttranslator.com".to_string()
}

fn default_deepl_endpoint() -> String {
    "https://api.deepl.com".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate the source locale
        let _source_name = crate::language_utils::get_language_name(&self.source_locale)?;

        if self.localizable_name.trim().is_empty() {
            return Err(anyhow!("Localizable file name must not be empty"));
        }

        // Validate the endpoint override, when one is set
        if !self.translation.endpoint.is_empty() {
            Url::parse(&self.translation.endpoint)
                .map_err(|e| anyhow!("Invalid translation endpoint '{}': {}", self.translation.endpoint, e))?;
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            path: default_path(),
            source_locale: default_source_locale(),
            localizable_name: default_localizable_name(),
            override_values: false,
            code: CodeConfig::default(),
            interfaces: InterfacesConfig::default(),
            normalize: NormalizeConfig::default(),
            lint: LintConfig::default(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
