// src/wiki/translate.rs
use async_trait::async_trait;

use crate::utils::config::WikiConfig;
use crate::utils::error::WikiError;
use crate::utils::validate::LanguageCode;
use crate::wiki::client::build_wiki_client;

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, language: &LanguageCode) -> Result<String, WikiError>;
}

/// Translation through the public Google Translate `translate_a/single` endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(config: &WikiConfig) -> Result<Self, WikiError> {
        Ok(Self {
            client: build_wiki_client(config)?,
            endpoint: config.translate_endpoint.clone(),
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, language: &LanguageCode) -> Result<String, WikiError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        tracing::debug!("Translating {} chars to {}", text.len(), language);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", language.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| WikiError::TranslationFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Translation endpoint returned {}", status);
            return Err(WikiError::TranslationFailure(format!("HTTP {}", status)));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WikiError::TranslationFailure(e.to_string()))?;

        translated_segments(&body).ok_or_else(|| {
            WikiError::TranslationFailure("Unexpected translation response shape".to_string())
        })
    }
}

/// Joins the translated segments of a `translate_a/single` response:
/// `[[["Halo dunia","Hello world",...], ...], ...]`.
fn translated_segments(body: &serde_json::Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(|v| v.as_str()) {
            out.push_str(piece);
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
