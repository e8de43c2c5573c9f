use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::domain::ai::model::{AiError, InlineImage};
use crate::domain::ai::service::GenerationClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize, Debug)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

#[derive(Serialize, Debug)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: Blob },
}

#[derive(Serialize, Debug)]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

impl GenerateRequest {
    pub fn new(prompt: &str, image: Option<&InlineImage>) -> Self {
        let mut parts = vec![Part::Text { text: prompt.to_string() }];
        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: Blob {
                    mime_type: image.mime_type.clone(),
                    data: base64::engine::general_purpose::STANDARD.encode(&image.data),
                },
            });
        }
        GenerateRequest { contents: vec![Content { role: "user", parts }] }
    }
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined in order.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|part| part.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// REST client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(base_url: &str) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(GeminiClient { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn endpoint(&self, model: &str) -> String {
        let model = model.trim().trim_start_matches('/');
        if model.starts_with("models/") {
            format!("{}/{}:generateContent", self.base_url, model)
        } else {
            format!("{}/models/{}:generateContent", self.base_url, model)
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, AiError> {
        let response = self.http
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(&GenerateRequest::new(prompt, image))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(AiError::Api { status: status.as_u16(), message });
        }

        let body: GenerateResponse = response.json().await?;
        body.text().ok_or(AiError::EmptyResponse)
    }
}
