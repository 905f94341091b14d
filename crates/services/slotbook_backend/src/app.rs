// --- File: crates/services/slotbook_backend/src/app.rs ---
use axum::{routing::get, Router};
use http::{header, Method};
use slotbook_booking::{routes as booking_routes, BookingState};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const LIVENESS_TEXT: &str = "Welcome to the slotbook API!";

/// Directory the static widget is served from in debug builds.
pub const STATIC_DIR: &str = "dist";

/// The full application: booking routes and liveness under `/api`, Swagger
/// UI with the `openapi` feature, the static widget in debug builds.
pub fn build_app(state: Arc<BookingState>) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { LIVENESS_TEXT }))
        .merge(booking_routes(state));

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use slotbook_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "slotbook API",
                version = "0.1.0",
                description = "Appointment scheduling: availability, slots and bookings"
            ),
            servers((url = "/api", description = "Main API prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let app = if cfg!(debug_assertions) {
        info!("Development build, serving static files from ./{}", STATIC_DIR);
        app.fallback_service(ServeDir::new(STATIC_DIR))
    } else {
        app
    };

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    )
    .layer(TraceLayer::new_for_http())
}
