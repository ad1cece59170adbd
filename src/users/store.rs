use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::users::repo_types::{UpdateFields, User};

/// CRUD surface over the `users` table.
///
/// Lookups report a missing row as `Ok(None)`. `update` and `remove` succeed
/// whether or not the id exists.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user under a freshly generated id and return that id.
    async fn create(&self, email: &str, password_hash: &str, name: &str)
        -> Result<Uuid, StoreError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Apply the set slots of `fields`. With nothing set the store is not contacted.
    async fn update(&self, id: Uuid, fields: &UpdateFields) -> Result<(), StoreError>;
    async fn remove(&self, id: Uuid) -> Result<(), StoreError>;
    /// Exact match on email and precomputed hash. No hashing happens here.
    async fn validate_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError>;
}
