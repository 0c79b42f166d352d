/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported machine
 * translation providers:
 * - Microsoft: Microsoft Translator API integration
 * - DeepL: DeepL API integration
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably when filling in empty values.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Get the display name of this provider
    ///
    /// # Returns
    /// * `&str` - The provider name used in log output
    fn name(&self) -> &str;

    /// Translate a single text into the target locale
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `target_locale` - The locale code to translate into
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Build the translator selected by the configuration
///
/// # Arguments
/// * `config` - The translation section of the application configuration
///
/// # Returns
/// * `Result<Box<dyn Translator>, ProviderError>` - The configured provider or an error
pub fn create_translator(config: &TranslationConfig) -> Result<Box<dyn Translator>, ProviderError> {
    if config.api_key.is_empty() {
        return Err(ProviderError::AuthenticationError(format!(
            "No API key configured for {}",
            config.provider.display_name()
        )));
    }

    match config.provider {
        TranslationProvider::Microsoft => Ok(Box::new(microsoft::MicrosoftTranslator::new(config))),
        TranslationProvider::DeepL => Ok(Box::new(deepl::DeepLTranslator::new(config))),
    }
}

pub mod deepl;
pub mod microsoft;
pub mod mock;
