use std::time::Duration;
use serde::{Serialize, Deserialize};
use async_trait::async_trait;
use reqwest::Client;
use log::error;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::Translator;

/// Microsoft Translator client for the Azure Cognitive Services text API
#[derive(Debug)]
pub struct MicrosoftTranslator {
    /// HTTP client for API requests
    client: Client,
    /// Subscription key for authentication
    subscription_key: String,
    /// Resource region, sent as a header when non-empty
    region: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// One element of the translation request body
#[derive(Debug, Serialize)]
pub struct TranslateRequestItem {
    /// The text to translate
    #[serde(rename = "Text")]
    pub text: String,
}

/// One element of the translation response body
#[derive(Debug, Deserialize)]
pub struct TranslateResponseItem {
    /// The translations produced for this item
    pub translations: Vec<TranslatedText>,
}

/// A single translated text
#[derive(Debug, Deserialize)]
pub struct TranslatedText {
    /// The translated text
    pub text: String,
}

impl MicrosoftTranslator {
    /// Create a new Microsoft Translator client
    pub fn new(config: &TranslationConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            subscription_key: config.api_key.clone(),
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        }
    }

    fn translate_url(&self, target_locale: &str) -> String {
        if self.endpoint.is_empty() {
            format!(
                "https://api.cognitive.microsofttranslator.com/translate?api-version=3.0&to={}",
                target_locale
            )
        } else {
            format!(
                "{}/translate?api-version=3.0&to={}",
                self.endpoint.trim_end_matches('/'),
                target_locale
            )
        }
    }
}

#[async_trait]
impl Translator for MicrosoftTranslator {
    fn name(&self) -> &str {
        "Microsoft Translator"
    }

    async fn translate(&self, text: &str, target_locale: &str) -> Result<String, ProviderError> {
        let api_url = self.translate_url(target_locale);
        let body = vec![TranslateRequestItem { text: text.to_string() }];

        let mut request = self.client.post(&api_url)
            .header("Content-Type", "application/json")
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key);

        // The region header is only required for regional resources
        if !self.region.is_empty() {
            request = request.header("Ocp-Apim-Subscription-Region", &self.region);
        }

        let response = request.json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(
                format!("Failed to send request to Microsoft Translator API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Microsoft Translator API error ({}): {}", status, error_text);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(error_text),
                429 => ProviderError::RateLimitExceeded(error_text),
                code => ProviderError::ApiError { status_code: code, message: error_text },
            });
        }

        let items = response.json::<Vec<TranslateResponseItem>>().await
            .map_err(|e| ProviderError::ParseError(
                format!("Failed to parse Microsoft Translator response: {}", e)))?;

        items.into_iter()
            .next()
            .and_then(|item| item.translations.into_iter().next())
            .map(|translation| translation.text)
            .ok_or_else(|| ProviderError::ParseError(
                "Microsoft Translator response contained no translations".to_string()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("Hello", "de").await?;
        Ok(())
    }
}
