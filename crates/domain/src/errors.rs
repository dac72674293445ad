use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found with id: {0}")]
    UserNotFound(i32),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}
