use std::sync::Arc;

use anyhow::{Context, anyhow};
use tracing::info;

use chat_widget::config::ServerConfig;
use chat_widget::routes;
use chat_widget::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    chat_widget::init_tracing();

    let config = ServerConfig::from_env().map_err(|e| anyhow!(e))?;
    let generator = config.generator.build();
    info!(backend = generator.name(), "text generator ready");

    let state = Arc::new(AppState::new(generator));
    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!(addr = %listener.local_addr()?, "generation server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
