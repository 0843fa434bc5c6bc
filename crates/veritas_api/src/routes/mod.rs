use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{documents, session, settings, students, verify};
use crate::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(verify::health_check))
        .route("/verify/:code", get(verify::verify_code))
        .route("/api/login", post(session::login))
        .route("/api/portal/profile", get(session::portal_profile))
        .route(
            "/api/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route("/api/settings/logo", post(settings::upload_logo))
        .route("/api/documents", post(documents::upload_document))
        .route(
            "/api/students",
            post(students::create_student).get(students::list_students),
        )
        .route(
            "/api/students/:id",
            axum::routing::patch(students::update_student).delete(students::delete_student),
        )
        .with_state(state)
}
