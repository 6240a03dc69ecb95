//! Server entrypoint: configuration, database pool, handler wiring, axum.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use urvue::adapters::ai::{OpenAIAssistant, OpenAIAssistantConfig};
use urvue::adapters::http::feedback::{feedback_routes, FeedbackHandlers};
use urvue::adapters::postgres::{
    PostgresLocationStore, PostgresMessageRepository, PostgresSessionRepository,
    PostgresSummaryRepository,
};
use urvue::application::handlers::feedback::{
    FinalizeSessionHandler, SessionGuard, StartSessionHandler, SubmitTurnHandler,
};
use urvue::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("failed to load configuration");
    config.validate().expect("invalid configuration");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Loaded configuration");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await
        .expect("failed to connect to database");

    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");
    }

    let api_key = config
        .ai
        .openai_api_key
        .clone()
        .expect("OPENAI_API_KEY is validated at startup");
    let assistant = Arc::new(
        OpenAIAssistant::new(
            OpenAIAssistantConfig::new(api_key)
                .with_chat_model(&config.ai.chat_model)
                .with_summary_model(&config.ai.summary_model)
                .with_timeout(config.ai.timeout())
                .with_max_retries(config.ai.max_retries),
        )
        .expect("failed to build OpenAI client"),
    );

    let locations = Arc::new(PostgresLocationStore::new(pool.clone()));
    let sessions = Arc::new(PostgresSessionRepository::new(pool.clone()));
    let messages = Arc::new(PostgresMessageRepository::new(pool.clone()));
    let summaries = Arc::new(PostgresSummaryRepository::new(pool.clone()));
    let guard = Arc::new(SessionGuard::new());

    let start = Arc::new(StartSessionHandler::new(
        Arc::clone(&locations),
        Arc::clone(&sessions),
    ));
    let finalize = Arc::new(FinalizeSessionHandler::new(
        Arc::clone(&sessions),
        Arc::clone(&messages),
        Arc::clone(&summaries),
        Arc::clone(&assistant),
        Arc::clone(&guard),
    ));
    let turn = Arc::new(SubmitTurnHandler::new(
        sessions,
        messages,
        locations,
        assistant,
        Arc::clone(&finalize),
        guard,
    ));

    let handlers = FeedbackHandlers::new(start, turn, finalize);

    let cors = build_cors_layer(&config);
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api/feedback", feedback_routes(handlers))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr().expect("invalid bind address");
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .await
        .expect("server terminated unexpectedly");
}

fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}
