use std::sync::Arc;

use axum::Router;
use axum::routing::get;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod token;
pub mod ws;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub registry: ws::registry::GameRegistry,
    pub config: Arc<Config>,
}

pub fn build_router(config: Config) -> (Router, AppState) {
    let config = Arc::new(config);
    let state = AppState {
        registry: ws::registry::GameRegistry::new(config.clone()),
        config,
    };

    let app = Router::new()
        .route("/ws/{match_id}", get(ws::handler::ws_upgrade))
        .nest("/api", routes::api::router())
        .route("/up", get(routes::health::health_check))
        .with_state(state.clone());

    (app, state)
}
