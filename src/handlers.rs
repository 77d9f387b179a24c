use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    ical::week_start_of,
    layout::{Layout, LayoutConfig, TimeSlot, build_layout},
    models::{ClassDraft, ClassEntry, Color, ScheduleSnapshot, Swatch},
    session::SessionHandle,
    validation::validate_week_start,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassCreated {
    pub id: Uuid,
    pub schedule: ScheduleSnapshot,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GridSettings {
    pub layout: LayoutConfig,
    pub palette: Vec<Swatch>,
    pub default_color: Color,
    pub slots: Vec<TimeSlot>,
    pub grid_height: f64,
    pub require_details: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub week: Option<NaiveDate>,
}

async fn session(state: &AppState, session_id: Uuid) -> Result<SessionHandle, ApiError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("session {session_id} not found")))
}

#[utoipa::path(get, path = "/", tag = "schedule")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Class Scheduler API",
        "endpoints": {
            "/config": "Grid days, time range and color palette",
            "/sessions": "Open an editing session",
            "/sessions/{session_id}/classes": "List, add, edit and delete classes",
            "/sessions/{session_id}/layout": "Weekly grid placements",
            "/sessions/{session_id}/schedule.ical": "Download schedule as iCal file"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "schedule")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "schedule")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/config",
    responses((status = 200, description = "Grid configuration", body = GridSettings)),
    tag = "schedule"
)]
pub async fn get_config(State(state): State<AppState>) -> Json<GridSettings> {
    let layout = state.layout.as_ref().clone();
    Json(GridSettings {
        palette: Color::PALETTE.into_iter().map(Swatch::from).collect(),
        default_color: Color::default(),
        slots: layout.time_slots(),
        grid_height: layout.grid_height(),
        require_details: state.settings.require_details,
        layout,
    })
}

#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session opened", body = SessionCreated),
        (status = 503, description = "Session limit reached")
    ),
    tag = "sessions"
)]
pub async fn open_session(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = state.sessions.open().await?;
    Ok((StatusCode::CREATED, Json(SessionCreated { session_id })))
}

#[utoipa::path(
    delete,
    path = "/sessions/{session_id}",
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses((status = 204, description = "Session closed")),
    tag = "sessions"
)]
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> StatusCode {
    state.sessions.close(session_id).await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/sessions/{session_id}/classes",
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "All classes in insertion order", body = ScheduleSnapshot),
        (status = 404, description = "Unknown session")
    ),
    tag = "classes"
)]
pub async fn list_classes(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ScheduleSnapshot>, ApiError> {
    let handle = session(&state, session_id).await?;
    let store = handle.lock().await;
    Ok(Json(store.snapshot()))
}

#[utoipa::path(
    post,
    path = "/sessions/{session_id}/classes",
    params(("session_id" = Uuid, Path, description = "Session id")),
    request_body = ClassDraft,
    responses(
        (status = 201, description = "Class added", body = ClassCreated),
        (status = 404, description = "Unknown session"),
        (status = 422, description = "Validation failed")
    ),
    tag = "classes"
)]
pub async fn create_class(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(draft): Json<ClassDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let handle = session(&state, session_id).await?;
    let mut store = handle.lock().await;
    let id = store.create(&draft)?;
    Ok((
        StatusCode::CREATED,
        Json(ClassCreated {
            id,
            schedule: store.snapshot(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/sessions/{session_id}/classes/{class_id}",
    params(
        ("session_id" = Uuid, Path, description = "Session id"),
        ("class_id" = Uuid, Path, description = "Class id")
    ),
    responses(
        (status = 200, description = "The class", body = ClassEntry),
        (status = 404, description = "Unknown session or class")
    ),
    tag = "classes"
)]
pub async fn get_class(
    State(state): State<AppState>,
    Path((session_id, class_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ClassEntry>, ApiError> {
    let handle = session(&state, session_id).await?;
    let store = handle.lock().await;
    store
        .get(class_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("class {class_id} not found")))
}

#[utoipa::path(
    put,
    path = "/sessions/{session_id}/classes/{class_id}",
    params(
        ("session_id" = Uuid, Path, description = "Session id"),
        ("class_id" = Uuid, Path, description = "Class id")
    ),
    request_body = ClassDraft,
    responses(
        (status = 200, description = "Class updated", body = ScheduleSnapshot),
        (status = 404, description = "Unknown session or class"),
        (status = 422, description = "Validation failed")
    ),
    tag = "classes"
)]
pub async fn update_class(
    State(state): State<AppState>,
    Path((session_id, class_id)): Path<(Uuid, Uuid)>,
    Json(draft): Json<ClassDraft>,
) -> Result<Json<ScheduleSnapshot>, ApiError> {
    let handle = session(&state, session_id).await?;
    let mut store = handle.lock().await;
    store.update(class_id, &draft)?;
    Ok(Json(store.snapshot()))
}

#[utoipa::path(
    delete,
    path = "/sessions/{session_id}/classes/{class_id}",
    params(
        ("session_id" = Uuid, Path, description = "Session id"),
        ("class_id" = Uuid, Path, description = "Class id")
    ),
    responses(
        (status = 200, description = "Class removed if it existed", body = ScheduleSnapshot),
        (status = 404, description = "Unknown session")
    ),
    tag = "classes"
)]
pub async fn delete_class(
    State(state): State<AppState>,
    Path((session_id, class_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ScheduleSnapshot>, ApiError> {
    let handle = session(&state, session_id).await?;
    let mut store = handle.lock().await;
    store.delete(class_id);
    Ok(Json(store.snapshot()))
}

#[utoipa::path(
    get,
    path = "/sessions/{session_id}/layout",
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Weekly grid placements", body = Layout),
        (status = 404, description = "Unknown session")
    ),
    tag = "classes"
)]
pub async fn get_layout(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Layout>, ApiError> {
    let handle = session(&state, session_id).await?;
    let store = handle.lock().await;
    let layout = build_layout(store.list(), &state.layout)?;
    Ok(Json(layout))
}

#[utoipa::path(
    get,
    path = "/sessions/{session_id}/schedule.ical",
    params(
        ("session_id" = Uuid, Path, description = "Session id"),
        ("week" = Option<String>, Query, description = "Monday the recurring events start from (YYYY-MM-DD), defaults to the current week")
    ),
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 400, description = "week is not a Monday"),
        (status = 404, description = "Unknown session or no classes")
    ),
    tag = "classes"
)]
pub async fn get_ical(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let week_start = match query.week {
        Some(week) => validate_week_start(week)?,
        None => week_start_of(Local::now().date_naive()),
    };

    let handle = session(&state, session_id).await?;
    let classes = handle.lock().await.list().to_vec();
    if classes.is_empty() {
        return Err(ApiError::NotFound("No classes found".into()));
    }

    let body = state.exporter.generate(&classes, week_start);
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            (
                "content-disposition",
                "attachment; filename=class_schedule.ics",
            ),
        ],
        body,
    ))
}
