use std::time::Duration;
use serde::{Serialize, Deserialize};
use async_trait::async_trait;
use reqwest::Client;
use log::error;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::Translator;

/// DeepL client for the v2 text translation API
#[derive(Debug)]
pub struct DeepLTranslator {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the paid API host)
    endpoint: String,
}

/// DeepL translation request
#[derive(Debug, Serialize)]
pub struct DeepLRequest {
    /// The texts to translate
    pub text: Vec<String>,

    /// Target language code, uppercase per the DeepL convention
    pub target_lang: String,
}

/// DeepL translation response
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// The translations produced for the request
    pub translations: Vec<DeepLTranslation>,
}

/// A single translated text
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// The translated text
    pub text: String,
}

impl DeepLTranslator {
    /// Create a new DeepL client
    pub fn new(config: &TranslationConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
        }
    }

    fn translate_url(&self) -> String {
        // Free-tier keys need an endpoint override to api-free.deepl.com
        if self.endpoint.is_empty() {
            "https://api.deepl.com/v2/translate".to_string()
        } else {
            format!("{}/v2/translate", self.endpoint.trim_end_matches('/'))
        }
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    fn name(&self) -> &str {
        "DeepL"
    }

    async fn translate(&self, text: &str, target_locale: &str) -> Result<String, ProviderError> {
        let request = DeepLRequest {
            text: vec![text.to_string()],
            target_lang: target_locale.to_uppercase(),
        };

        let response = self.client.post(self.translate_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(
                format!("Failed to send request to DeepL API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(error_text),
                // 456 is DeepL's quota-exhausted status
                429 | 456 => ProviderError::RateLimitExceeded(error_text),
                code => ProviderError::ApiError { status_code: code, message: error_text },
            });
        }

        let deepl_response = response.json::<DeepLResponse>().await
            .map_err(|e| ProviderError::ParseError(
                format!("Failed to parse DeepL response: {}", e)))?;

        deepl_response.translations
            .into_iter()
            .next()
            .map(|translation| translation.text)
            .ok_or_else(|| ProviderError::ParseError(
                "DeepL response contained no translations".to_string()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("Hello", "de").await?;
        Ok(())
    }
}
