use nexus_plot::ConvertOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionConfig {
    pub name: String,
    pub id: String,
    pub version: String,
    pub description: String,
    pub mode: String,
    pub author: String,
    pub cmd: Vec<String>,
    pub enabled: bool,
    pub last_updated: String,
    pub git_path: String,
    pub category: String,
    pub post_url: String,
    pub webpage: String,
    pub file_formats: Vec<String>,
    pub ask_form: bool,
    pub connection: Connection,
    #[serde(default)]
    pub configuration: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub ip: String,
    pub port: u16,
    pub target: String,
    pub target_port: u16,
}

impl ExtensionConfig {
    /// Conversion settings from the free-form `configuration` object.
    pub fn convert_options(&self) -> serde_json::Result<ConvertOptions> {
        match &self.configuration {
            Value::Null => Ok(ConvertOptions::default()),
            v => serde_json::from_value(v.clone()),
        }
    }

    pub fn core_url(&self) -> String {
        format!("{}:{}", self.connection.target, self.connection.target_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLUGIN_JSON: &str = r#"{
        "name": "Nexus Plot Reader",
        "id": "nexus_plot_reader",
        "version": "0.1.0",
        "description": "Reads Nexus .plt files",
        "mode": "offline",
        "author": "",
        "cmd": ["plotune_nexus_reader"],
        "enabled": true,
        "last_updated": "",
        "git_path": "",
        "category": "reader",
        "post_url": "",
        "webpage": "",
        "file_formats": ["plt", "gz", "zst", "lz4"],
        "ask_form": false,
        "connection": {"ip": "127.0.0.1", "port": 0, "target": "127.0.0.1", "target_port": 8000}
    }"#;

    #[test]
    fn test_defaults_without_configuration() {
        let config: ExtensionConfig = serde_json::from_str(PLUGIN_JSON).unwrap();
        assert_eq!(config.convert_options().unwrap(), ConvertOptions::default());
        assert_eq!(config.core_url(), "127.0.0.1:8000");
    }

    #[test]
    fn test_configuration_overrides() {
        let mut config: ExtensionConfig = serde_json::from_str(PLUGIN_JSON).unwrap();
        config.configuration = serde_json::json!({"class": "WELL", "instance": "P1"});
        let options = config.convert_options().unwrap();
        assert_eq!(options.class, "WELL");
        assert_eq!(options.instance, "P1");
    }
}
