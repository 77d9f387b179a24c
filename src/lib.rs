pub mod error;
pub mod handlers;
pub mod ical;
pub mod layout;
pub mod models;
pub mod openapi;
pub mod session;
pub mod settings;
pub mod store;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use handlers::{
    close_session, create_class, delete_class, get_class, get_config, get_ical, get_layout,
    healthz_live, healthz_ready, list_classes, open_session, root, update_class,
};
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ical::ICalExporter;
use crate::layout::LayoutConfig;
use crate::openapi::ApiDoc;
use crate::session::SessionRegistry;
use crate::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub layout: Arc<LayoutConfig>,
    pub sessions: Arc<SessionRegistry>,
    pub exporter: Arc<ICalExporter>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, config::ConfigError> {
        let layout = settings.layout_config()?;
        let sessions = SessionRegistry::new(
            layout.days().to_vec(),
            settings.require_details,
            settings.max_sessions,
        );
        Ok(Self {
            settings,
            layout: Arc::new(layout),
            sessions: Arc::new(sessions),
            exporter: Arc::new(ICalExporter::new()),
        })
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let state = AppState::new(settings)?;
    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!(
        days = ?state.layout.days(),
        "Starting Class Scheduler API on {addr}"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/config", get(get_config))
        .route("/sessions", post(open_session))
        .route("/sessions/{session_id}", delete(close_session))
        .route(
            "/sessions/{session_id}/classes",
            get(list_classes).post(create_class),
        )
        .route(
            "/sessions/{session_id}/classes/{class_id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        .route("/sessions/{session_id}/layout", get(get_layout))
        .route("/sessions/{session_id}/schedule.ical", get(get_ical))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(trace_layer).layer(CorsLayer::permissive())
}
