mod api;
mod dto;
mod state;

use crate::state::AppState;
use axum::routing::{get, post};
use busplan::prelude::*;
use std::{path::PathBuf, sync::Arc, time::Instant};
use tokio::sync::Mutex;
use tracing::{error, info};

const PORT: u32 = 3000;
const DEFAULT_RESPONSES_PATH: &str = "survey_responses.csv";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 2 {
        error!("Missing stop table csv");
        std::process::exit(1);
    }
    let table_path = PathBuf::from(&args[1]);
    let responses_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESPONSES_PATH));

    info!("Loading stop table...");
    let now = Instant::now();
    let reader = if table_path.extension().is_some_and(|ext| ext == "zip") {
        TableReader::new(TableConfig::default()).from_zip(table_path)
    } else {
        TableReader::new(TableConfig::default()).from_csv(table_path)
    };
    let repository = match Repository::new().load_table(reader) {
        Ok(repository) => repository,
        Err(err) => {
            error!("Failed to load stop table: {err}");
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} stops on {} routes with {} terminals in {:?}",
        repository.stops.len(),
        repository.routes.len(),
        repository.terminals().len(),
        now.elapsed()
    );

    let sink = match CsvSink::append_to(&responses_path) {
        Ok(sink) => sink,
        Err(err) => {
            error!("Failed to open {}: {err}", responses_path.display());
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState {
        repository,
        sink: Mutex::new(sink),
    });

    let app = axum::Router::new()
        .route("/search", get(api::search))
        .route("/stops", get(api::stops))
        .route("/routes/direct", get(api::direct_routes))
        .route("/routes/candidates", get(api::candidate_routes))
        .route("/plan", get(api::plan))
        .route("/survey", post(api::survey))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", PORT)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {PORT}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {PORT}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
