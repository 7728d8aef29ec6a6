//! Base repository trait for database operations.

use crate::db::errors::Result;

/// Common CRUD surface shared by the per-aggregate repositories.
///
/// Each repository wraps a `&mut PgConnection` and provides strongly-typed
/// operations over one table, with separate associated types for create
/// requests, update requests, and responses. Listing is deliberately not
/// part of the trait: each aggregate has its own listing contract (reels are
/// cursor-paginated, the others are key-addressed only).
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest: Sync;

    /// The request type for updating entities
    type UpdateRequest: Sync;

    /// The response type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Sync + ?Sized;

    /// Insert a new entity, returning the row as stored (server-assigned
    /// timestamps included)
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Fetch an entity by id; soft-deleted rows are invisible
    async fn get_by_id(&mut self, id: &Self::Id) -> Result<Self::Response>;

    /// Rewrite an entity's mutable fields; zero affected rows surface as
    /// [`crate::db::errors::DbError::NotUpdated`]
    async fn update(&mut self, id: &Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;

    /// Soft-delete an entity; zero affected rows surface as
    /// [`crate::db::errors::DbError::NotDeleted`]
    async fn delete(&mut self, id: &Self::Id) -> Result<()>;
}
