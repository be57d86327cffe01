use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::authz::RoleAssignmentProvider;
use crate::errors::AppError;
use crate::jwt::JwtConfig;
use crate::routes::{health, signatures};

#[derive(Clone)]
pub struct AppState {
    pub jwt: Arc<JwtConfig>,
    pub roles: Arc<dyn RoleAssignmentProvider>,
}

impl AppState {
    pub fn new(jwt: JwtConfig, roles: Arc<dyn RoleAssignmentProvider>) -> Self {
        Self {
            jwt: Arc::new(jwt),
            roles,
        }
    }
}

pub async fn create_app(roles: Arc<dyn RoleAssignmentProvider>) -> Result<Router, AppError> {
    let jwt_config = JwtConfig::from_env()?;
    let state = AppState::new(jwt_config, roles);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    let signature_routes = Router::new()
        .route("/evaluate", post(signatures::evaluate))
        .route("/filters", post(signatures::filters));

    let router = Router::new()
        .route("/api/health", get(health::health))
        .nest("/signatures", signature_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
