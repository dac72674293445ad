use crate::entities::{NewUser, User};
use crate::errors::DomainError;
use async_trait::async_trait;

/// Repository trait - defines what we need from persistence layer
/// This is a PORT in hexagonal architecture
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, ordered by ascending id.
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
    async fn insert(&self, new_user: &NewUser) -> Result<User, DomainError>;
    /// Replace all mutable fields; `None` when no row matched the id.
    async fn replace(&self, id: i32, new_user: &NewUser) -> Result<Option<User>, DomainError>;
    /// Delete by id, returning the removed row; `None` when no row matched.
    async fn delete(&self, id: i32) -> Result<Option<User>, DomainError>;
}
