mod api;
mod dto;
mod error;
mod params;
mod state;

use crate::state::AppState;
use axum::routing::get;
use std::{env, process, sync::Arc, time::Instant};
use tracing::{error, info};
use wayfare::{graph::GraphConfig, loader::load_graph, store::StoreGateway};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();
    dotenvy::dotenv().ok();

    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(err) => {
            error!("Failed loading DATABASE_URL: {}", err);
            process::exit(1);
        }
    };
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let store = match StoreGateway::connect(&database_url).await {
        Ok(store) => store,
        Err(err) => {
            error!("Failed to connect to the store: {err}");
            process::exit(1);
        }
    };

    info!("Loading transit graph...");
    let now = Instant::now();
    let config = GraphConfig::default();
    let graph = match load_graph(&store, &config).await {
        Ok(graph) => graph,
        Err(err) => {
            error!("Failed to load transit graph: {err}");
            process::exit(1);
        }
    };
    info!("Loading transit graph took {:?}", now.elapsed());

    let app_state = Arc::new(AppState {
        graph,
        store,
        config,
    });

    info!("Starting server...");
    let app = axum::Router::new()
        .route("/health", get(api::health))
        .route("/api/v1/lines", get(api::list_lines))
        .route("/api/v1/lines/{id}", get(api::line_detail))
        .route("/api/v1/stops", get(api::stops_in_box))
        .route("/api/v1/stops/{id}", get(api::stop_detail))
        .route("/api/v1/route", get(api::plan_route))
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .unwrap();
    info!("Listening to port {port}");
    axum::serve(listener, app).await.unwrap();
}
