use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{MediaFields, MediaItem, UNKNOWN_GENRE};
use crate::services::assistant::CatalogAssistant;
use crate::store::MediaStore;

/// Orchestrates item creation and update
///
/// Per request: fetch the caller's existing titles, ask the assistant whether
/// the candidate is a duplicate, infer a genre if the candidate arrived
/// without one, then write through the store. Assistant failures never
/// surface from here; the only non-success outcomes are a duplicate
/// rejection and, on update, not-found.
///
/// Duplicate check and write are not atomic: two concurrent creates for the
/// same owner and title can both pass the check and both persist. Accepted
/// race, exercised in tests.
pub struct IngestionPipeline {
    store: Arc<dyn MediaStore>,
    assistant: Arc<dyn CatalogAssistant>,
}

impl IngestionPipeline {
    pub fn new(store: Arc<dyn MediaStore>, assistant: Arc<dyn CatalogAssistant>) -> Self {
        Self { store, assistant }
    }

    #[instrument(skip(self, fields), fields(title = %fields.title))]
    pub async fn create(&self, owner: Uuid, mut fields: MediaFields) -> AppResult<MediaItem> {
        let existing_titles: Vec<String> = self
            .store
            .list_all(owner)
            .await
            .into_iter()
            .map(|item| item.title)
            .collect();

        if self.is_duplicate(&fields, &existing_titles).await {
            return Err(AppError::Duplicate(
                "A similar item already exists in your collection".to_string(),
            ));
        }

        self.fill_missing_genre(&mut fields).await;
        Ok(self.store.insert(owner, fields).await)
    }

    #[instrument(skip(self, fields), fields(title = %fields.title))]
    pub async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        mut fields: MediaFields,
    ) -> AppResult<MediaItem> {
        // The item under update must not count as its own duplicate
        let existing_titles: Vec<String> = self
            .store
            .list_all(owner)
            .await
            .into_iter()
            .filter(|item| item.id != id)
            .map(|item| item.title)
            .collect();

        if self.is_duplicate(&fields, &existing_titles).await {
            return Err(AppError::Duplicate(
                "Another item with this title/creator already exists".to_string(),
            ));
        }

        self.fill_missing_genre(&mut fields).await;
        self.store
            .replace(id, owner, fields)
            .await
            .ok_or_else(|| AppError::NotFound(format!("No media item {} for this user", id)))
    }

    /// Fail-open duplicate decision: an assistant error reads as not-duplicate
    async fn is_duplicate(&self, fields: &MediaFields, existing_titles: &[String]) -> bool {
        match self
            .assistant
            .check_duplicate(&fields.title, &fields.creator, existing_titles)
            .await
        {
            Ok(duplicate) => duplicate,
            Err(e) => {
                tracing::warn!(error = %e, "duplicate check failed, allowing the write");
                false
            }
        }
    }

    /// Genre inference must never fail the request; anything short of a clean
    /// suggestion becomes the sentinel
    async fn fill_missing_genre(&self, fields: &mut MediaFields) {
        if !fields.genre.trim().is_empty() {
            return;
        }

        fields.genre = match self
            .assistant
            .suggest_genre(&fields.title, &fields.creator)
            .await
        {
            Ok(genre) if !genre.trim().is_empty() => genre,
            Ok(_) => UNKNOWN_GENRE.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "genre inference failed, using sentinel");
                UNKNOWN_GENRE.to_string()
            }
        };
    }
}
