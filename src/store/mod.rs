pub mod memory;

pub use memory::InMemoryStore;

use uuid::Uuid;

use crate::models::{MediaFields, MediaFilter, MediaItem};

/// Owner-scoped persistence contract for media items
///
/// Every operation is scoped to an owner id; no implementation may observe or
/// mutate another owner's items through this interface. Listing and search
/// results come back ordered by title ascending (case-insensitive).
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// All items belonging to `owner`, ordered by title
    async fn list_all(&self, owner: Uuid) -> Vec<MediaItem>;

    /// Single item lookup; `None` when the id does not exist for this owner
    async fn get(&self, id: Uuid, owner: Uuid) -> Option<MediaItem>;

    /// Insert a new item for `owner`; assigns the id and both timestamps
    async fn insert(&self, owner: Uuid, fields: MediaFields) -> MediaItem;

    /// Overwrite all mutable fields of `(id, owner)`, refreshing `updated_at`;
    /// `None` when no such item exists for this owner
    async fn replace(&self, id: Uuid, owner: Uuid, fields: MediaFields) -> Option<MediaItem>;

    /// Remove `(id, owner)`; true if a row existed and was removed
    async fn delete(&self, id: Uuid, owner: Uuid) -> bool;

    /// Filtered subset of `list_all`, same ordering; an empty filter returns
    /// the full collection
    async fn search(&self, owner: Uuid, filter: &MediaFilter) -> Vec<MediaItem>;
}
