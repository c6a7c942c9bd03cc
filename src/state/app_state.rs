use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use nexus_plot::{ConvertOptions, ConvertedSeries, Plot};

use crate::models::extension_model::ExtensionConfig;

pub struct LoadedPlot {
    pub path: String,
    pub plot: Arc<Plot>,
    pub series: Arc<ConvertedSeries>,
}

#[derive(Clone)]
pub struct SignalInfo {
    pub file_id: Uuid,
    pub keyword: String, // The keyword in the converted series
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ExtensionConfig>,
    pub options: Arc<ConvertOptions>,
    pub readers: Arc<RwLock<HashMap<Uuid, LoadedPlot>>>,
    // Maps unique_name -> SignalInfo
    pub signals: Arc<RwLock<HashMap<String, SignalInfo>>>,
}

impl AppState {
    pub fn new(config: ExtensionConfig, options: ConvertOptions) -> Self {
        Self {
            config: Arc::new(config),
            options: Arc::new(options),
            readers: Arc::new(RwLock::new(HashMap::new())),
            signals: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Stores a decoded file, then exposes one uniquely named signal per
    /// keyword. The reader is in place before any of its signals are
    /// visible to `/fetch`.
    pub async fn publish(
        &self,
        path: String,
        plot: Plot,
        series: ConvertedSeries,
    ) -> (Uuid, Vec<String>) {
        let file_id = Uuid::new_v4();
        let series = Arc::new(series);
        self.readers.write().await.insert(
            file_id,
            LoadedPlot {
                path,
                plot: Arc::new(plot),
                series: series.clone(),
            },
        );

        let mut exposed_headers = Vec::new();
        let mut signals = self.signals.write().await;
        for keyword in series.keywords() {
            let final_name = unique_name(&*signals, keyword);
            info!("Register signal: {} (keyword: {})", final_name, keyword);
            signals.insert(
                final_name.clone(),
                SignalInfo {
                    file_id,
                    keyword: keyword.to_string(),
                },
            );
            exposed_headers.push(final_name);
        }

        (file_id, exposed_headers)
    }
}

/// `base`, or `base_1`, `base_2`, ... whichever is not yet taken.
pub fn unique_name<V>(taken: &HashMap<String, V>, base: &str) -> String {
    if !taken.contains_key(base) {
        return base.to_string();
    }
    (1..)
        .map(|i| format!("{}_{}", base, i))
        .find(|candidate| !taken.contains_key(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_plot::{
        convert, ClassName, Header, InstanceName, Sample, UnitSystem, UnitType, VariableCatalog,
        VariableCode,
    };

    fn state() -> AppState {
        let config: ExtensionConfig = serde_json::from_value(serde_json::json!({
            "name": "Nexus Plot Reader", "id": "nexus_plot_reader", "version": "0.1.0",
            "description": "", "mode": "offline", "author": "", "cmd": [], "enabled": true,
            "last_updated": "", "git_path": "", "category": "reader", "post_url": "",
            "webpage": "", "file_formats": ["plt"], "ask_form": false,
            "connection": {"ip": "127.0.0.1", "port": 0, "target": "127.0.0.1", "target_port": 8000}
        }))
        .unwrap();
        AppState::new(config, ConvertOptions::default())
    }

    fn field_plot() -> Plot {
        let mut catalog = VariableCatalog::new();
        catalog.insert(ClassName::padded("FIELD"), vec![VariableCode::padded("QOP")]);
        let sample = Sample {
            timestep: 1,
            time: 0.0,
            max_perfs: 0,
            class: ClassName::padded("FIELD"),
            instance: InstanceName::padded("NETWORK"),
            variable: VariableCode::padded("QOP"),
            value: 12.5,
        };
        Plot {
            header: Header::from_fields(
                UnitSystem::new(UnitType::MetricBars),
                [1, 1, 1, 1980, 10, 10, 3, 0],
            ),
            catalog,
            samples: vec![sample],
        }
    }

    #[tokio::test]
    async fn test_publish_signals_resolve_to_readers() {
        let state = state();
        for _ in 0..2 {
            let plot = field_plot();
            let series = convert(&plot, &state.options).unwrap();
            state.publish("SPE1.plt".to_string(), plot, series).await;
        }

        let readers = state.readers.read().await;
        let signals = state.signals.read().await;
        assert_eq!(readers.len(), 2);
        assert!(signals.contains_key("FOPR"));
        assert!(signals.contains_key("FOPR_1"));
        for info in signals.values() {
            let loaded = readers.get(&info.file_id).unwrap();
            assert!(loaded.series.get(&info.keyword).is_some());
        }
    }

    #[test]
    fn test_unique_name() {
        let mut taken: HashMap<String, ()> = HashMap::new();
        assert_eq!(unique_name(&taken, "FOPR"), "FOPR");
        taken.insert("FOPR".to_string(), ());
        taken.insert("FOPR_1".to_string(), ());
        assert_eq!(unique_name(&taken, "FOPR"), "FOPR_2");
    }
}
