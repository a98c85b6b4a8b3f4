//! Korean to English translation of post content.
//!
//! Translation is best-effort: every failure is logged and reported as `None`, and
//! the notification goes out without the translated line.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

/// Translates text between languages.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Returns the translation, or `None` when it is unavailable for any reason.
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Option<String>;
}

/// Translator used when no endpoint is configured.
pub struct NoTranslator;

#[async_trait]
impl Translator for NoTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Option<String> {
        None
    }
}

/// Body returned by the translation endpoint.
#[derive(Debug, Deserialize)]
struct TranslationResponse {
    code: i64,
    text: Option<String>,
}

impl TranslationResponse {
    /// A response only carries a usable translation when `code` is 0.
    fn into_text(self) -> Option<String> {
        if self.code != 0 {
            return None;
        }

        self.text.filter(|text| !text.trim().is_empty())
    }
}

/// Translator backed by the HTTP translation endpoint.
///
/// Posts a form with `text`, `src_lang` and `target_lang`, authenticated by the
/// configured key in the `Authorization` header.
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpTranslator {
    pub fn new(client: reqwest::Client, endpoint: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    async fn request(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Option<String>, reqwest::Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.api_key)
            .form(&[
                ("text", text),
                ("src_lang", source_lang),
                ("target_lang", target_lang),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                "Translation endpoint returned status {}",
                response.status()
            );
            return Ok(None);
        }

        let body: TranslationResponse = response.json().await?;
        if body.code != 0 {
            tracing::warn!("Translation endpoint returned code {}", body.code);
        }

        Ok(body.into_text())
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        match self.request(text, source_lang, target_lang).await {
            Ok(translation) => translation,
            Err(e) => {
                tracing::warn!("Failed to translate post content: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Option<String> {
        serde_json::from_str::<TranslationResponse>(body)
            .ok()
            .and_then(TranslationResponse::into_text)
    }

    #[test]
    fn accepts_successful_response() {
        assert_eq!(
            parse(r#"{"code": 0, "text": "Hello"}"#),
            Some("Hello".to_string())
        );
    }

    #[test]
    fn rejects_error_code() {
        assert_eq!(parse(r#"{"code": 1, "text": "Hello"}"#), None);
    }

    #[test]
    fn rejects_missing_or_blank_text() {
        assert_eq!(parse(r#"{"code": 0}"#), None);
        assert_eq!(parse(r#"{"code": 0, "text": "  "}"#), None);
    }

    #[test]
    fn rejects_malformed_body() {
        assert_eq!(parse("<html>bad gateway</html>"), None);
    }

    #[tokio::test]
    async fn no_translator_never_translates() {
        assert_eq!(NoTranslator.translate("안녕하세요", "ko", "en").await, None);
    }

    #[tokio::test]
    async fn http_translator_degrades_on_connection_failure() {
        let translator = HttpTranslator::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/translate".to_string(),
            "key".to_string(),
        );

        assert_eq!(translator.translate("안녕하세요", "ko", "en").await, None);
    }
}
