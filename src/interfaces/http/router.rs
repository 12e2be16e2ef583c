//! API Router with Swagger UI

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    BoxError, Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::users::UserService;

use super::common::{ApiError, ErrorResponse};
use super::modules::health::{self, HealthResponse};
use super::modules::request_id::request_id_middleware;
use super::modules::users::{self, CreateUserRequest, UpdateUserRequest, UserResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            UserResponse,
            CreateUserRequest,
            UpdateUserRequest,
        )
    ),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Users", description = "User records with derived age"),
    ),
    info(
        title = "User API",
        version = "1.0.0",
        description = "CRUD REST API for user records (name, date of birth, computed age)",
    )
)]
pub struct ApiDoc;

/// Router-level settings
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Requests running longer are aborted with 408
    pub request_timeout: Duration,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Create the API router with all routes
pub fn create_api_router(user_service: Arc<UserService>, options: RouterOptions) -> Router {
    let user_state = users::UserHandlerState { user_service };

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(user_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let routes = Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .merge(user_routes)
        .fallback(route_not_found);

    with_middleware(routes, &options)
}

/// Apply the shared middleware stack to `routes`.
fn with_middleware(routes: Router, options: &RouterOptions) -> Router {
    // Layers wrap inside-out: the last one added sees the request first.
    routes
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(options.request_timeout),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "route not found")
}

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::new(StatusCode::REQUEST_TIMEOUT, "request timed out")
    } else {
        error!(error = %err, "Unhandled middleware error");
        ApiError::internal("internal server error")
    }
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Request handler panicked");

    ApiError::internal("internal server error").into_response()
}
