use axum::{
    extract::{ws::WebSocketUpgrade, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use std::fs::File;
use std::io::BufWriter;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use nexus_plot::{
    convert, handle_ws_fetch, load, JsonSummaryWriter, PlotError, SummaryCase, SummaryWriter,
};

use crate::state::app_state::AppState;

#[derive(Serialize)]
pub struct ReaderSummary {
    pub id: Uuid,
    pub path: String,
    pub signals_count: usize,
    pub headers: Vec<String>,
}

/// Response for GET /readers/{id}/headers
#[derive(Serialize)]
pub struct ReaderHeaders {
    pub id: Uuid,
    pub headers: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct FileReadRequest {
    pub mode: String, // "online" | "offline"
    pub path: String,
}

#[derive(Serialize, Debug)]
pub struct FileReadResponse {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub source: String,
    pub headers: Option<Vec<String>>,
    pub desc: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: Option<String>,
    pub source_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ExportRequest {
    pub case: String,
    pub path: String,
}

/// =======================
/// ROUTER
/// =======================

pub fn data_routes(state: AppState) -> Router {
    Router::new()
        .route("/read-file", post(read_file))
        .route("/fetch/{signal}", get(ws_fetch))
        .route("/readers", get(list_readers))
        .route("/readers/{id}/headers", get(reader_headers))
        .route("/readers/{id}/export", post(export_summary))
        .with_state(state)
}

fn error_status(e: &PlotError) -> StatusCode {
    match e {
        PlotError::ReadError { .. } => StatusCode::NOT_FOUND,
        PlotError::BadHeader(_)
        | PlotError::UnrecognizedUnitSystem(_)
        | PlotError::UnexpectedEndOfFile { .. }
        | PlotError::InconsistentTimeAxis { .. }
        | PlotError::InvalidStartDate { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// =======================
/// HANDLERS
/// =======================

async fn read_file(
    State(state): State<AppState>,
    Json(request): Json<FileReadRequest>,
) -> Response {
    debug!("Reading file: mode={}, path={}", request.mode, request.path);

    let path = request.path.clone();
    let options = state.options.clone();
    let decoded = tokio::task::spawn_blocking(move || {
        let plot = load(&path)?;
        let series = convert(&plot, &options)?;
        Ok::<_, PlotError>((plot, series))
    })
    .await;

    let (plot, series) = match decoded {
        Ok(Ok(pair)) => pair,
        Ok(Err(e)) => {
            error!("Failed to read {}: {}", request.path, e);
            return error_status(&e).into_response();
        }
        Err(e) => {
            error!("Decode task failed for {}: {}", request.path, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    for code in &series.skipped {
        warn!("{}: variable {} not exposed", request.path, code);
    }

    let (file_id, exposed_headers) = state.publish(request.path.clone(), plot, series).await;

    let file_name = std::path::Path::new(&request.path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    Json(FileReadResponse {
        id: file_id,
        name: file_name,
        path: request.path.clone(),
        source: request.path,
        headers: Some(exposed_headers),
        desc: None,
        tags: None,
        created_at: Some(chrono::Utc::now().to_rfc3339()),
        source_url: None,
    })
    .into_response()
}

async fn ws_fetch(
    State(state): State<AppState>,
    Path(signal_name): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    let signal_info = state.signals.read().await.get(&signal_name).cloned();

    let Some(info) = signal_info else {
        error!("Signal not found: {}", signal_name);
        return StatusCode::NOT_FOUND.into_response();
    };

    let series = state
        .readers
        .read()
        .await
        .get(&info.file_id)
        .map(|r| r.series.clone());

    let Some(series) = series else {
        error!("Reader {} for signal {} is gone", info.file_id, signal_name);
        return StatusCode::NOT_FOUND.into_response();
    };

    ws.on_upgrade(move |socket| handle_ws_fetch(socket, series, info.keyword))
}

async fn list_readers(State(state): State<AppState>) -> Json<Vec<ReaderSummary>> {
    let readers = state.readers.read().await;
    let signals = state.signals.read().await;

    let mut out: Vec<ReaderSummary> = readers
        .iter()
        .map(|(id, loaded)| {
            let mut headers: Vec<String> = signals
                .iter()
                .filter(|(_, info)| info.file_id == *id)
                .map(|(name, _)| name.clone())
                .collect();
            headers.sort();
            ReaderSummary {
                id: *id,
                path: loaded.path.clone(),
                signals_count: headers.len(),
                headers,
            }
        })
        .collect();
    out.sort_by(|a, b| a.path.cmp(&b.path));

    Json(out)
}

async fn reader_headers(State(state): State<AppState>, Path(reader_id): Path<Uuid>) -> Response {
    let loaded = state
        .readers
        .read()
        .await
        .get(&reader_id)
        .map(|r| r.series.clone());

    let Some(series) = loaded else {
        return StatusCode::NOT_FOUND.into_response();
    };

    Json(ReaderHeaders {
        id: reader_id,
        headers: series.keywords().map(str::to_string).collect(),
    })
    .into_response()
}

async fn export_summary(
    State(state): State<AppState>,
    Path(reader_id): Path<Uuid>,
    Json(request): Json<ExportRequest>,
) -> Response {
    let loaded = state
        .readers
        .read()
        .await
        .get(&reader_id)
        .map(|r| (r.plot.clone(), r.series.clone()));

    let Some((plot, series)) = loaded else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let out_path = request.path.clone();
    let written = tokio::task::spawn_blocking(move || {
        let case = SummaryCase::new(&request.case, &plot, &series)?;
        let file = File::create(&request.path)?;
        JsonSummaryWriter::new(BufWriter::new(file)).write(&case)
    })
    .await;

    match written {
        Ok(Ok(())) => {
            info!("Exported reader {} to {}", reader_id, out_path);
            StatusCode::OK.into_response()
        }
        Ok(Err(e)) => {
            error!("Export of {} failed: {}", reader_id, e);
            error_status(&e).into_response()
        }
        Err(e) => {
            error!("Export task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
