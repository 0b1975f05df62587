// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{profile, quiz},
    state::AppState,
    utils::jwt::cookie_auth_middleware,
};

/// Assembles the main application router.
///
/// * `/profile` sits behind the cookie authentication middleware.
/// * `/tests` routes forward to the configured test store.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            // A wildcard would make CorsLayer panic alongside credentials.
            Ok(_) if origin == "*" => {
                tracing::warn!("Ignoring wildcard CORS origin");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // Credentials are allowed so browsers send the auth cookie cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let profile_routes = Router::new()
        .route("/profile", get(profile::get_profile))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            cookie_auth_middleware,
        ));

    let test_routes = Router::new()
        .route("/", get(quiz::list_tests).post(quiz::create_test))
        .route("/submit", post(quiz::submit_test));

    Router::new()
        .merge(profile_routes)
        .nest("/tests", test_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{config::Config, store::ProcessTestStore};

    #[test]
    fn wildcard_origin_does_not_break_router() {
        let config = Config {
            jwt_secret: "secret".to_string(),
            test_module_path: "true".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            cors_origins: vec!["*".to_string(), "http://localhost:3000".to_string()],
            rust_log: "error".to_string(),
            log_dir: "logs".to_string(),
        };
        let state = AppState {
            store: Arc::new(ProcessTestStore::new("true")),
            config,
        };

        let _router = create_router(state);
    }
}
