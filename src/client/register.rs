use reqwest::Client;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::time::{sleep, Duration};
use tracing::{error, info};

use crate::models::extension_model::ExtensionConfig;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Serialize)]
pub struct HealthPayload {
    pub id: String,
    pub timestamp: f64,
}

/// Talks to the Plotune core that launched this extension.
pub struct CoreClient {
    http: Client,
    core_url: String,
}

impl CoreClient {
    pub fn new(config: &ExtensionConfig) -> Self {
        Self {
            http: Client::new(),
            core_url: config.core_url(),
        }
    }

    pub async fn register(&self, config: &ExtensionConfig) -> anyhow::Result<()> {
        let register_url = format!("http://{}/register", self.core_url);
        info!("Registering to Plotune Core: {}", register_url);

        self.http
            .post(&register_url)
            .json(config)
            .send()
            .await?
            .error_for_status()?;

        info!("Successfully registered to Plotune Core!");
        Ok(())
    }

    pub async fn run_heartbeat(self, id: String) {
        let heartbeat_url = format!("http://{}/heartbeat", self.core_url);
        info!("Heartbeat worker started for ID: {}", id);

        loop {
            let payload = HealthPayload {
                id: id.clone(),
                timestamp: SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs_f64())
                    .unwrap_or_default(),
            };

            match self.http.post(&heartbeat_url).json(&payload).send().await {
                Ok(resp) if resp.status().is_success() => {
                    info!("Heartbeat sent successfully");
                }
                Ok(resp) => error!("Heartbeat server error: {}", resp.status()),
                Err(e) => error!("Heartbeat network error: {}", e),
            }

            sleep(HEARTBEAT_INTERVAL).await;
        }
    }
}
