use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{AiRecommendation, UNKNOWN_GENRE};
use crate::services::gemini::GenerativeBackend;

/// Cap on how many existing titles a duplicate-check prompt may list
const MAX_PROMPT_TITLES: usize = 10;

/// Advisory AI operations over the catalog
///
/// Every operation degrades to a deterministic, harmless default instead of
/// surfacing a backend failure; callers may still defend against `Err` from
/// other implementations, but the shipped one never returns it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogAssistant: Send + Sync {
    /// Best-effort one-or-two-word genre; `"Unknown"` when the backend fails
    async fn suggest_genre(&self, title: &str, creator: &str) -> AppResult<String>;

    /// Fuzzy duplicate check against the caller's existing titles.
    ///
    /// Fails open: a backend failure reads as "not a duplicate" so writes are
    /// never blocked solely because the assistant is unreachable.
    async fn check_duplicate(
        &self,
        title: &str,
        creator: &str,
        existing_titles: &[String],
    ) -> AppResult<bool>;

    /// Free-text recommendation; the fixed fallback object when the backend
    /// fails or replies with something unparseable
    async fn recommend(&self, title: &str, creator: &str) -> AppResult<AiRecommendation>;
}

/// Assistant built on a single text-generation call
pub struct RecommendationAssistant {
    backend: Arc<dyn GenerativeBackend>,
}

impl RecommendationAssistant {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait::async_trait]
impl CatalogAssistant for RecommendationAssistant {
    async fn suggest_genre(&self, title: &str, creator: &str) -> AppResult<String> {
        let prompt = format!(
            "What genre best describes '{}' by '{}'? \
             Respond with only the genre name (one or two words max).",
            title, creator
        );

        match self.backend.generate(&prompt).await {
            Ok(reply) => {
                let genre = clean_genre(&reply);
                if genre.is_empty() {
                    Ok(UNKNOWN_GENRE.to_string())
                } else {
                    Ok(genre)
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "genre suggestion unavailable, using sentinel");
                Ok(UNKNOWN_GENRE.to_string())
            }
        }
    }

    async fn check_duplicate(
        &self,
        title: &str,
        creator: &str,
        existing_titles: &[String],
    ) -> AppResult<bool> {
        if existing_titles.is_empty() {
            return Ok(false);
        }

        let listed = existing_titles
            .iter()
            .take(MAX_PROMPT_TITLES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let prompt = format!(
            "Is '{}' by '{}' likely the same as any of these existing items: {}? \
             Consider variations in spelling, abbreviations, and alternative titles. \
             Respond with only 'YES' or 'NO'.",
            title, creator, listed
        );

        match self.backend.generate(&prompt).await {
            Ok(reply) => Ok(is_affirmative(&reply)),
            Err(e) => {
                tracing::warn!(error = %e, "duplicate check unavailable, failing open");
                Ok(false)
            }
        }
    }

    async fn recommend(&self, title: &str, creator: &str) -> AppResult<AiRecommendation> {
        let prompt = format!(
            "Analyze this media item: '{}' by '{}'. \
             Provide a JSON response with: \
             1. Most appropriate genre (single word) \
             2. 3 similar items you'd recommend \
             3. Brief reasoning (1 sentence) \
             Respond ONLY with valid JSON in this exact format: \
             {{\"suggestedGenre\": \"genre\", \"similarItems\": [\"item1\", \"item2\", \"item3\"], \"reasoning\": \"explanation\"}} \
             Do not include any text outside the JSON object.",
            title, creator
        );

        match self.backend.generate(&prompt).await {
            Ok(reply) => Ok(parse_recommendation(&reply).unwrap_or_else(|| {
                tracing::warn!("recommendation reply unparseable, using fallback");
                AiRecommendation::fallback()
            })),
            Err(e) => {
                tracing::warn!(error = %e, "recommendation unavailable, using fallback");
                Ok(AiRecommendation::fallback())
            }
        }
    }
}

/// Normalize a raw genre reply: trim and drop quotation marks
fn clean_genre(raw: &str) -> String {
    raw.trim().replace('"', "")
}

/// YES-detection on a free-text yes/no reply, case-folded
fn is_affirmative(raw: &str) -> bool {
    raw.trim().to_uppercase().contains("YES")
}

/// Extract a recommendation object from a free-text reply.
///
/// Models routinely wrap JSON in markdown fences or surround it with prose,
/// and field-name casing is not reliable. The reply is cleaned (fences
/// stripped, then the substring from the first `{` to the last `}`) and field
/// names are matched case-insensitively. `None` means the reply is unusable.
fn parse_recommendation(raw: &str) -> Option<AiRecommendation> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }

    let value: serde_json::Value = serde_json::from_str(&cleaned[start..=end]).ok()?;
    let object = value.as_object()?;
    let field = |name: &str| {
        object
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    };

    let suggested_genre = field("suggestedGenre")?.as_str()?.to_string();
    let similar_items = field("similarItems")?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;
    let reasoning = field("reasoning")?.as_str()?.to_string();

    Some(AiRecommendation {
        suggested_genre,
        similar_items,
        reasoning,
    })
}
