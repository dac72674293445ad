use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::error;

pub mod repositories;

pub use repositories::*;

/// Owns the PostgreSQL connection pool shared by every request.
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect using `DATABASE_URL` when provided; otherwise the driver
    /// reads the libpq-style `PG*` environment variables on its own.
    pub async fn connect(database_url: Option<&str>) -> Result<Self, sqlx::Error> {
        let pool = match database_url {
            Some(url) => PgPoolOptions::new().connect(url).await?,
            None => {
                PgPoolOptions::new()
                    .connect_with(PgConnectOptions::new())
                    .await?
            }
        };
        Ok(Database { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connection-level faults that no request can recover from. Everything
/// else stays a per-request error.
pub fn is_fatal(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

/// Spawn the fatal-fault watcher and hand back its sender. The first
/// fault received logs and terminates the process; restarting is the
/// supervisor's job, not ours.
pub fn spawn_fatal_watcher() -> UnboundedSender<sqlx::Error> {
    let (tx, mut rx) = mpsc::unbounded_channel::<sqlx::Error>();
    tokio::spawn(async move {
        if let Some(err) = rx.recv().await {
            error!("Unexpected PostgreSQL error: {}", err);
            std::process::exit(1);
        }
    });
    tx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_level_errors_are_fatal() {
        let io = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ));
        assert!(is_fatal(&io));
        assert!(is_fatal(&sqlx::Error::PoolClosed));
        assert!(is_fatal(&sqlx::Error::WorkerCrashed));
    }

    #[test]
    fn statement_level_errors_are_not_fatal() {
        assert!(!is_fatal(&sqlx::Error::RowNotFound));
        assert!(!is_fatal(&sqlx::Error::Protocol(
            "unexpected message".into()
        )));
        assert!(!is_fatal(&sqlx::Error::ColumnNotFound("age".into())));
    }
}
