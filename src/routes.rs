use crate::{
    assignment::{self, Assignment, AssignmentPayload, IngestResponse, Snapshot},
    middleware::auth_middleware,
    notification::{
        self, AssignmentLine, AssignmentSection, DispatchResponse, Greeting,
        NotificationDocument, SectionKind,
    },
    state::AppState,
};
use axum::{
    extract::State,
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        assignment::assignment_handlers::ingest_assignments,
        assignment::assignment_handlers::get_latest_snapshot,
        notification::notification_handlers::send_notification,
    ),
    components(
        schemas(
            Assignment,
            AssignmentPayload,
            IngestResponse,
            Snapshot,
            DispatchResponse,
            NotificationDocument,
            Greeting,
            AssignmentSection,
            AssignmentLine,
            SectionKind,
        )
    ),
    tags(
        (name = "assignments", description = "Assignment snapshot ingestion"),
        (name = "notifications", description = "Reminder dispatch")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

async fn homepage(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.config.homepage_url)
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Protected routes (API key required)
    let api_routes = Router::new()
        .route(
            "/data",
            get(assignment::get_latest_snapshot).post(assignment::ingest_assignments),
        )
        .route("/send-notification", post(notification::send_notification))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(homepage))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
