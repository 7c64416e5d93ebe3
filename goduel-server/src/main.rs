use axum::extract::Request;
use tower::Layer as _;
use tower_http::normalize_path::NormalizePathLayer;

use goduel_server::config::Config;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goduel_server=debug".into()),
        )
        .init();

    let config = Config::from_env();
    let port = config.port;
    tracing::info!(
        "Board {0}x{0}, komi {1}, {2:?} scoring",
        config.board_size,
        config.komi,
        config.scoring_rules
    );

    let (app, state) = goduel_server::build_router(config);

    let sweep_state = state.clone();
    tokio::spawn(async move {
        goduel_server::services::sweep::run(sweep_state).await;
    });

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("Starting goduel-server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    let app = NormalizePathLayer::trim_trailing_slash().layer(app);
    axum::serve(
        listener,
        axum::ServiceExt::<Request>::into_make_service(app),
    )
    .await
    .expect("Server error");
}
