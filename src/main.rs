use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lingomem::config::{self, AiConfig};
use lingomem::db::{self, SqliteStore};
use lingomem::services::HttpCompletionClient;
use lingomem::state::AppState;
use lingomem::{handlers, paths};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lingomem=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let ai_config = AiConfig::load();

  let db_path = paths::db_path();
  let pool = db::init_db(Path::new(&db_path)).expect("Failed to initialize database");

  let client = HttpCompletionClient::new(&ai_config).expect("Failed to build HTTP client");
  let state = AppState::with_sqlite(SqliteStore::new(pool), Arc::new(client), &ai_config);

  let app = handlers::router(state);

  let bind_addr = config::server_bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", config::server_port());

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
