use axum::Router;
use tracing::{info, Level};

mod client;
mod models;
mod routes;
mod state;
mod utils;

use crate::client::register::CoreClient;
use crate::state::app_state::AppState;
use crate::utils::conf_helper::{bind, load_config, CONFIG_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    // === CONFIG + LISTENER ===
    let mut config = load_config(CONFIG_PATH).await?;
    let listener = bind(&mut config).await?;
    let options = config.convert_options()?;

    info!(
        "Server initialized on {}:{} (series {}/{})",
        config.connection.ip, config.connection.port, options.class, options.instance
    );

    let core = CoreClient::new(&config);
    core.register(&config).await?;
    tokio::spawn(core.run_heartbeat(config.id.clone()));

    let state = AppState::new(config, options);

    let app = Router::new()
        .merge(routes::info_routes::health_routes(state.clone()))
        .merge(routes::data_routes::data_routes(state));

    axum::serve(listener, app).await?;
    Ok(())
}
