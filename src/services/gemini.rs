use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Placeholder value shipped in sample configs; treated the same as no key
const PLACEHOLDER_API_KEY: &str = "YOUR_GEMINI_API_KEY_HERE";

/// Text-generation backend abstraction
///
/// The only contract: given a prompt, return free-form text within a bounded
/// time, or fail. No structured output is guaranteed; all parsing of replies
/// belongs to the caller. Calls are never retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Gemini generateContent client
///
/// Posts `{"contents":[{"parts":[{"text": prompt}]}]}` to the configured
/// endpoint and extracts `candidates[0].content.parts[0].text` from the
/// reply. The request timeout is set on the client, so a hung backend
/// surfaces as an ordinary call failure.
#[derive(Clone)]
pub struct GeminiBackend {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiBackend {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.gemini_api_key.clone(),
            api_url: config.gemini_api_url.clone(),
        })
    }

    fn ensure_configured(&self) -> AppResult<()> {
        if self.api_key.is_empty() || self.api_key == PLACEHOLDER_API_KEY {
            return Err(AppError::Assistant("API key not configured".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.ensure_configured()?;

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(format!("{}?key={}", self.api_url, self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Assistant(format!(
                "generateContent returned status {}",
                status
            )));
        }

        let parsed: GenerateResponse = response.json().await?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AppError::Assistant("reply contained no candidate text".to_string()))
    }
}
