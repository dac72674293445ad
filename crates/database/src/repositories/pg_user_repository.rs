use async_trait::async_trait;
use domain::{DomainError, NewUser, User, UserRepository};
use sqlx::postgres::PgPool;
use tokio::sync::mpsc::UnboundedSender;

use crate::is_fatal;

// Database model - separate from domain entity
#[derive(sqlx::FromRow, Debug)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    age: i32,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(row.id, row.name, row.email, row.age)
    }
}

/// PostgreSQL adapter for the `UserRepository` port. Every statement uses
/// positional placeholders; user input never reaches the SQL text.
pub struct PgUserRepository {
    pool: PgPool,
    fatal_tx: UnboundedSender<sqlx::Error>,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, fatal_tx: UnboundedSender<sqlx::Error>) -> Self {
        Self { pool, fatal_tx }
    }

    /// Forward connection-level faults to the watcher, then surface the
    /// driver message verbatim for the per-request 500 path.
    fn surface(&self, err: sqlx::Error) -> DomainError {
        let message = err.to_string();
        if is_fatal(&err) {
            let _ = self.fatal_tx.send(err);
        }
        DomainError::RepositoryError(message)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, email, age FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| self.surface(e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let row =
            sqlx::query_as::<_, UserRow>("SELECT id, name, email, age FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| self.surface(e))?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (name, email, age) VALUES ($1, $2, $3) RETURNING id, name, email, age",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(new_user.age)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| self.surface(e))?;

        Ok(row.into())
    }

    async fn replace(&self, id: i32, new_user: &NewUser) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users SET name = $1, email = $2, age = $3 WHERE id = $4 RETURNING id, name, email, age",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(new_user.age)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| self.surface(e))?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i32) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            "DELETE FROM users WHERE id = $1 RETURNING id, name, email, age",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| self.surface(e))?;

        Ok(row.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    #[test]
    fn row_converts_into_domain_entity() {
        let row = UserRow {
            id: 3,
            name: "Ann".into(),
            email: "ann@x.com".into(),
            age: 30,
        };

        let user: User = row.into();
        assert_eq!(user, User::new(3, "Ann".into(), "ann@x.com".into(), 30));
    }

    #[tokio::test]
    async fn surface_forwards_only_fatal_errors() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let repo = PgUserRepository::new(pool, tx);

        let err = repo.surface(sqlx::Error::RowNotFound);
        assert!(matches!(err, DomainError::RepositoryError(_)));
        assert!(rx.try_recv().is_err());

        repo.surface(sqlx::Error::PoolClosed);
        assert!(matches!(rx.try_recv(), Ok(sqlx::Error::PoolClosed)));
    }
}
