use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sv_notebook::handlers::LogOnError;
use sv_notebook::{config, content, router, session::SessionStore, state::AppState};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sv_notebook=debug,fill_engine=info,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = config::load();

  let library = content::load_lessons(&config.content_dir)
    .log_warn_default("Failed to load lessons");
  if library.is_empty() {
    tracing::warn!("No lessons available; add lesson_XX.json files to {}", config.content_dir.display());
  }

  let state = AppState::new(library, SessionStore::new(config.session_expiry_minutes));
  let app = router::build_router(state);

  let bind_addr = config.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", config.server_port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
