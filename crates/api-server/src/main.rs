use anyhow::Result;
use config::Config;
use database::{spawn_fatal_watcher, Database, PgUserRepository};
use domain::UserService;
use std::sync::Arc;
use tracing::info;

mod handlers;
mod routes;
mod validation;

use handlers::AppState;
use routes::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("api_server=debug,tower_http=debug")
        .init();

    info!("🚀 Starting users API server");

    // Load configuration from environment
    let config = Config::from_env();

    let database = Database::connect(config.database_url.as_deref()).await?;

    // First pool-level fault logs and terminates the process; the
    // supervisor restarts us.
    let fatal_tx = spawn_fatal_watcher();
    let repository = Arc::new(PgUserRepository::new(database.pool().clone(), fatal_tx));
    let user_service = Arc::new(UserService::new(repository));

    let app = create_router(AppState { user_service });

    let bind_address = format!("{}:{}", config.api_host, config.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🌐 Server listening on http://{}", bind_address);
    info!("📖 Endpoints:");
    info!("   GET    /           - Liveness");
    info!("   GET    /users      - List all users");
    info!("   POST   /users      - Create a user");
    info!("   GET    /users/:id  - Get a user");
    info!("   PUT    /users/:id  - Replace a user");
    info!("   DELETE /users/:id  - Delete a user");

    axum::serve(listener, app).await?;

    Ok(())
}
