use axum::extract::ws::{Message, WebSocket};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::convert::{ConvertedSeries, SummaryVector};

#[derive(Serialize, Debug, PartialEq)]
pub struct SignalPayload {
    pub timestamp: f64,
    pub value: f64,
    pub desc: String,
    pub seq: u64,
    pub end_flag: bool,
}

/// The websocket frames for one keyword: one point per sample with the
/// elapsed time in days as timestamp, then an end marker.
pub fn signal_payloads(series: &ConvertedSeries, vector: &SummaryVector) -> Vec<SignalPayload> {
    let mut out: Vec<SignalPayload> = vector
        .points
        .iter()
        .filter_map(|(index, value)| series.time_axis.get(*index).map(|p| (p.time, *value)))
        .enumerate()
        .map(|(seq, (time, value))| SignalPayload {
            timestamp: f64::from(time),
            value: f64::from(value),
            desc: vector.unit.clone(),
            seq: seq as u64,
            end_flag: false,
        })
        .collect();

    out.push(SignalPayload {
        timestamp: 0.0,
        value: 0.0,
        desc: String::new(),
        seq: out.len() as u64,
        end_flag: true,
    });
    out
}

pub async fn handle_ws_fetch(mut socket: WebSocket, series: Arc<ConvertedSeries>, keyword: String) {
    info!("ws_fetch streaming started: {}", keyword);

    let Some(vector) = series.get(&keyword) else {
        error!("keyword not found: {}", keyword);
        return;
    };

    for payload in signal_payloads(&series, vector) {
        let json = match serde_json::to_string(&payload) {
            Ok(j) => j,
            Err(e) => {
                error!("json serialize error: {}", e);
                return;
            }
        };

        if let Err(e) = socket.send(Message::Text(json.into())).await {
            warn!("ws send failed: {}", e);
            return;
        }
    }

    info!("ws_fetch finished: {}", keyword);
}
