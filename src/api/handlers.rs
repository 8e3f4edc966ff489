use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::{AppError, AppResult};
use crate::models::{AiRecommendation, MediaFields, MediaFilter, MediaItem, MediaStatus, MediaType};

use super::AppState;

// Request types

/// Create and update share one body shape: update is a full-field overwrite
#[derive(Debug, Deserialize)]
pub struct MediaItemRequest {
    pub title: String,
    pub creator: String,
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub genre: Option<String>,
    pub media_type: MediaType,
    pub status: MediaStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

const MAX_TITLE_LEN: usize = 200;
const MAX_CREATOR_LEN: usize = 100;
const MAX_GENRE_LEN: usize = 50;
const MAX_NOTES_LEN: usize = 500;

impl MediaItemRequest {
    /// Validate bounds and requiredness, then lower into store fields
    fn into_fields(self) -> AppResult<MediaFields> {
        let title = self.title.trim().to_string();
        let creator = self.creator.trim().to_string();
        let genre = self.genre.unwrap_or_default().trim().to_string();
        let notes = self.notes.unwrap_or_default();

        if title.is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::Validation(format!(
                "title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }
        if creator.is_empty() {
            return Err(AppError::Validation("creator is required".to_string()));
        }
        if creator.chars().count() > MAX_CREATOR_LEN {
            return Err(AppError::Validation(format!(
                "creator must be at most {} characters",
                MAX_CREATOR_LEN
            )));
        }
        if genre.chars().count() > MAX_GENRE_LEN {
            return Err(AppError::Validation(format!(
                "genre must be at most {} characters",
                MAX_GENRE_LEN
            )));
        }
        if notes.chars().count() > MAX_NOTES_LEN {
            return Err(AppError::Validation(format!(
                "notes must be at most {} characters",
                MAX_NOTES_LEN
            )));
        }

        Ok(MediaFields {
            title,
            creator,
            release_date: self.release_date,
            genre,
            media_type: self.media_type,
            status: self.status,
            notes,
        })
    }
}

/// Query-string shape of the search endpoint; empty strings mean "no filter"
/// so a bare `?title=` behaves like omitting the parameter
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub genre: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub status: Option<MediaStatus>,
}

impl SearchQuery {
    fn into_filter(self) -> MediaFilter {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.trim().is_empty())
        }

        MediaFilter {
            title: non_empty(self.title),
            creator: non_empty(self.creator),
            genre: non_empty(self.genre),
            media_type: self.media_type,
            status: self.status,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// List the caller's whole collection, ordered by title
pub async fn list_media(State(state): State<AppState>, user: CurrentUser) -> Json<Vec<MediaItem>> {
    Json(state.store.list_all(user.id()).await)
}

/// Fetch one item; cross-owner ids read as not-found
pub async fn get_media(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MediaItem>> {
    state
        .store
        .get(id, user.id())
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No media item {} for this user", id)))
}

/// Create an item through the ingestion pipeline
pub async fn create_media(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<MediaItemRequest>,
) -> AppResult<(StatusCode, Json<MediaItem>)> {
    let fields = request.into_fields()?;
    let item = state.pipeline.create(user.id(), fields).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Overwrite an item through the ingestion pipeline
pub async fn update_media(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<MediaItemRequest>,
) -> AppResult<Json<MediaItem>> {
    let fields = request.into_fields()?;
    let item = state.pipeline.update(id, user.id(), fields).await?;
    Ok(Json(item))
}

/// Delete an item; cross-owner ids read as not-found
pub async fn delete_media(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if state.store.delete(id, user.id()).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No media item {} for this user",
            id
        )))
    }
}

/// Filtered search over the caller's collection
pub async fn search_media(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<MediaItem>> {
    let filter = query.into_filter();
    Json(state.store.search(user.id(), &filter).await)
}

/// Advisory recommendation for one owned item.
///
/// Assistant trouble degrades to the fixed fallback object; the only failure
/// this endpoint surfaces is not-found.
pub async fn ai_recommendation(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AiRecommendation>> {
    let item = state
        .store
        .get(id, user.id())
        .await
        .ok_or_else(|| AppError::NotFound(format!("No media item {} for this user", id)))?;

    let recommendation = state
        .assistant
        .recommend(&item.title, &item.creator)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "assistant recommend failed, using fallback");
            AiRecommendation::fallback()
        });

    Ok(Json(recommendation))
}
