pub mod health;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::assist;
use crate::auth::handlers as auth_handlers;
use crate::auth::middleware::{optional_auth, require_admin, require_auth};
use crate::content::{contact, education, experience, messages, projects, visitors};
use crate::media;
use crate::profile;
use crate::state::AppState;

/// Assembles the full route tree. Same-path routes with different methods
/// (public GET /projects, admin POST /projects) merge at the method level,
/// each side keeping its own middleware.
pub fn build_router(state: AppState) -> Router {
    // Admin-only content management
    let admin_routes = Router::new()
        .route("/projects", post(projects::create))
        .route(
            "/projects/:id",
            put(projects::update).delete(projects::remove),
        )
        .route("/experience", post(experience::create))
        .route(
            "/experience/:id",
            put(experience::update).delete(experience::remove),
        )
        .route("/education", post(education::create))
        .route(
            "/education/:id",
            put(education::update).delete(education::remove),
        )
        .route("/messages", get(messages::list))
        .route(
            "/messages/:id",
            patch(messages::mark_read).delete(messages::remove),
        )
        .route("/upload", post(media::upload))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Any authenticated account
    let account_routes = Router::new()
        .route(
            "/auth/update-credentials",
            put(auth_handlers::update_credentials),
        )
        .route("/contact", put(contact::update))
        .route(
            "/portfolio-context",
            get(profile::handlers::get).put(profile::handlers::update),
        )
        .route("/portfolio-context/reset", post(profile::handlers::reset))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Anonymous works too; a valid token enriches suggestions with the
    // caller's profile.
    let assist_routes = Router::new()
        .route("/ai/suggest", post(assist::handlers::suggest))
        .route_layer(middleware::from_fn_with_state(state.clone(), optional_auth));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/auth/login", post(auth_handlers::login))
        .route("/projects", get(projects::list))
        .route("/experience", get(experience::list))
        .route("/education", get(education::list))
        .route("/contact", get(contact::get))
        .route("/messages", post(messages::submit))
        .route("/visitors", get(visitors::get).post(visitors::increment))
        .route("/ai/chat", post(assist::handlers::chat))
        .merge(admin_routes)
        .merge(account_routes)
        .merge(assist_routes)
        .with_state(state)
}
