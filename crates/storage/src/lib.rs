#![warn(clippy::pedantic)]

use serde_json::Value;
use strum::AsRefStr;
use vigor_domain::StorageError;

pub mod documents;
pub mod memory;
pub mod records;

#[cfg(test)]
mod tests;

pub use documents::DocumentError;
pub use memory::MemoryStore;
pub use records::Records;

/// A document database keyed by collection name and document id, the only
/// contract the domain layer requires of its backing store. Writes are
/// whole-document upserts that become visible to the next read.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    async fn read_documents(&self, collection: Collection) -> Result<Vec<Value>, StorageError>;
    async fn read_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, StorageError>;
    async fn put_document(
        &self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<(), StorageError>;
    async fn delete_document(&self, collection: Collection, id: &str)
    -> Result<(), StorageError>;
}

impl<S: DocumentStore> DocumentStore for &S {
    async fn read_documents(&self, collection: Collection) -> Result<Vec<Value>, StorageError> {
        (**self).read_documents(collection).await
    }

    async fn read_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, StorageError> {
        (**self).read_document(collection, id).await
    }

    async fn put_document(
        &self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<(), StorageError> {
        (**self).put_document(collection, id, document).await
    }

    async fn delete_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<(), StorageError> {
        (**self).delete_document(collection, id).await
    }
}

#[derive(AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    #[strum(serialize = "userProfiles")]
    UserProfiles,
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "playlists")]
    Playlists,
    #[strum(serialize = "scheduledWorkouts")]
    ScheduledWorkouts,
    #[strum(serialize = "workoutWeeks")]
    WorkoutWeeks,
    #[strum(serialize = "workoutCycles")]
    WorkoutCycles,
    #[strum(serialize = "progress")]
    Progress,
}
