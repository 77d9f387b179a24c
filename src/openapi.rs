use utoipa::OpenApi;

use crate::handlers::{ClassCreated, GridSettings, SessionCreated};
use crate::layout::{Layout, LayoutConfig, Placement, TimeSlot};
use crate::models::{ClassDraft, ClassEntry, Color, Day, ScheduleSnapshot, Swatch};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::get_config,
        crate::handlers::open_session,
        crate::handlers::close_session,
        crate::handlers::list_classes,
        crate::handlers::create_class,
        crate::handlers::get_class,
        crate::handlers::update_class,
        crate::handlers::delete_class,
        crate::handlers::get_layout,
        crate::handlers::get_ical
    ),
    components(schemas(
        Day,
        Color,
        Swatch,
        ClassEntry,
        ClassDraft,
        ScheduleSnapshot,
        LayoutConfig,
        TimeSlot,
        Placement,
        Layout,
        GridSettings,
        SessionCreated,
        ClassCreated
    )),
    tags(
        (name = "schedule", description = "Service and grid configuration"),
        (name = "sessions", description = "Editing sessions, each with its own schedule"),
        (name = "classes", description = "Class schedule operations")
    ),
)]
pub struct ApiDoc;
