use anyhow::Context;
use tokio::fs;
use tokio::net::TcpListener;
use tracing::info;

use crate::models::extension_model::ExtensionConfig;

pub const CONFIG_PATH: &str = "plugin.json";

pub async fn load_config(file_path: &str) -> anyhow::Result<ExtensionConfig> {
    let data = fs::read_to_string(file_path)
        .await
        .with_context(|| format!("reading {file_path}"))?;

    serde_json::from_str(&data).with_context(|| format!("parsing {file_path}"))
}

/// Binds the configured address and patches the actual port back into
/// the config, so a port of 0 becomes a dynamic one.
pub async fn bind(config: &mut ExtensionConfig) -> anyhow::Result<TcpListener> {
    let bind_addr = format!("{}:{}", config.connection.ip, config.connection.port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    let actual_port = listener.local_addr()?.port();
    config.connection.port = actual_port;

    info!("Config initialized with dynamic port: {}", actual_port);

    Ok(listener)
}
