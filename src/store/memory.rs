use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{MediaFields, MediaFilter, MediaItem};
use crate::store::MediaStore;

/// In-memory media store
///
/// Backing map is keyed by item id; owner scoping is enforced on every read
/// and write. Good enough for a single-process deployment and for tests; the
/// `MediaStore` trait is the seam a database-backed implementation would
/// plug into.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    items: Arc<RwLock<HashMap<Uuid, MediaItem>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_by_title(items: &mut [MediaItem]) {
    items.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
}

#[async_trait::async_trait]
impl MediaStore for InMemoryStore {
    async fn list_all(&self, owner: Uuid) -> Vec<MediaItem> {
        let items = self.items.read().await;
        let mut owned: Vec<MediaItem> = items
            .values()
            .filter(|item| item.owner_id == owner)
            .cloned()
            .collect();
        sort_by_title(&mut owned);
        owned
    }

    async fn get(&self, id: Uuid, owner: Uuid) -> Option<MediaItem> {
        let items = self.items.read().await;
        items
            .get(&id)
            .filter(|item| item.owner_id == owner)
            .cloned()
    }

    async fn insert(&self, owner: Uuid, fields: MediaFields) -> MediaItem {
        let now = Utc::now();
        let item = MediaItem {
            id: Uuid::new_v4(),
            owner_id: owner,
            title: fields.title,
            creator: fields.creator,
            release_date: fields.release_date,
            genre: fields.genre,
            media_type: fields.media_type,
            status: fields.status,
            notes: fields.notes,
            created_at: now,
            updated_at: now,
        };

        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());
        item
    }

    async fn replace(&self, id: Uuid, owner: Uuid, fields: MediaFields) -> Option<MediaItem> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).filter(|item| item.owner_id == owner)?;

        item.title = fields.title;
        item.creator = fields.creator;
        item.release_date = fields.release_date;
        item.genre = fields.genre;
        item.media_type = fields.media_type;
        item.status = fields.status;
        item.notes = fields.notes;
        item.updated_at = Utc::now();

        Some(item.clone())
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> bool {
        let mut items = self.items.write().await;
        match items.get(&id) {
            Some(item) if item.owner_id == owner => {
                items.remove(&id);
                true
            }
            _ => false,
        }
    }

    async fn search(&self, owner: Uuid, filter: &MediaFilter) -> Vec<MediaItem> {
        let items = self.items.read().await;
        let mut matched: Vec<MediaItem> = items
            .values()
            .filter(|item| item.owner_id == owner && filter.matches(item))
            .cloned()
            .collect();
        sort_by_title(&mut matched);
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaStatus, MediaType};

    fn fields(title: &str, creator: &str, genre: &str) -> MediaFields {
        MediaFields {
            title: title.to_string(),
            creator: creator.to_string(),
            release_date: None,
            genre: genre.to_string(),
            media_type: MediaType::Movie,
            status: MediaStatus::Wishlist,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn list_all_is_owner_scoped_and_title_ordered() {
        let store = InMemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.insert(alice, fields("zodiac", "David Fincher", "Thriller")).await;
        store.insert(alice, fields("Arrival", "Denis Villeneuve", "Sci-Fi")).await;
        store.insert(bob, fields("Dune", "Denis Villeneuve", "Sci-Fi")).await;

        let titles: Vec<String> = store
            .list_all(alice)
            .await
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["Arrival", "zodiac"]);
    }

    #[tokio::test]
    async fn get_misses_for_foreign_owner() {
        let store = InMemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let item = store.insert(alice, fields("Dune", "Denis Villeneuve", "")).await;
        assert!(store.get(item.id, bob).await.is_none());
        assert!(store.get(item.id, alice).await.is_some());
    }

    #[tokio::test]
    async fn replace_overwrites_fields_and_refreshes_updated_at() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        let created = store.insert(owner, fields("Dune", "Frank Herbert", "Sci-Fi")).await;
        let mut next = fields("Dune Messiah", "Frank Herbert", "Sci-Fi");
        next.status = MediaStatus::Completed;

        let updated = store.replace(created.id, owner, next).await.unwrap();
        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.status, MediaStatus::Completed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn replace_misses_for_foreign_owner() {
        let store = InMemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let item = store.insert(alice, fields("Dune", "Frank Herbert", "")).await;
        let result = store
            .replace(item.id, bob, fields("Hijacked", "Nobody", ""))
            .await;
        assert!(result.is_none());

        // Untouched under the real owner
        assert_eq!(store.get(item.id, alice).await.unwrap().title, "Dune");
    }

    #[tokio::test]
    async fn delete_is_owner_scoped() {
        let store = InMemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let item = store.insert(alice, fields("Dune", "Frank Herbert", "")).await;
        assert!(!store.delete(item.id, bob).await);
        assert!(store.delete(item.id, alice).await);
        assert!(!store.delete(item.id, alice).await);
    }

    #[tokio::test]
    async fn search_equals_filtered_list_all() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        store.insert(owner, fields("Dune", "Denis Villeneuve", "Sci-Fi")).await;
        store.insert(owner, fields("Dune: Part Two", "Denis Villeneuve", "Sci-Fi")).await;
        store.insert(owner, fields("Oppenheimer", "Christopher Nolan", "Drama")).await;

        let filter = MediaFilter {
            title: Some("dune".to_string()),
            creator: Some("villeneuve".to_string()),
            ..Default::default()
        };

        let results = store.search(owner, &filter).await;
        let expected: Vec<MediaItem> = store
            .list_all(owner)
            .await
            .into_iter()
            .filter(|i| filter.matches(i))
            .collect();
        assert_eq!(results, expected);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Dune");
    }

    #[tokio::test]
    async fn empty_filter_returns_full_collection() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        store.insert(owner, fields("Dune", "Denis Villeneuve", "Sci-Fi")).await;
        store.insert(owner, fields("Portal", "Valve", "Puzzle")).await;

        let results = store.search(owner, &MediaFilter::default()).await;
        assert_eq!(results, store.list_all(owner).await);
    }
}
