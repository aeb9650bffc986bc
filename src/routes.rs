use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::handlers::{create_handler, delete_handler, get_handler, update_handler};
use crate::registry::AdminState;

/// Build the admin router: one path, dispatched by verb and query string.
///
/// Update is verb-agnostic and mounted on both PATCH and PUT. Mount the
/// result wherever the host wants it, e.g.
/// `Router::new().nest("/admin", crudadmin::router(state))`.
#[must_use]
pub fn router(state: AdminState) -> Router {
    Router::new()
        .route(
            "/",
            get(get_handler)
                .post(create_handler)
                .patch(update_handler)
                .put(update_handler)
                .delete(delete_handler),
        )
        .with_state(state)
}

/// OpenAPI document covering the four admin operations.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_handler,
        crate::handlers::create_handler,
        crate::handlers::update_handler,
        crate::handlers::delete_handler
    ),
    components(schemas(crate::models::ListResponse))
)]
pub struct AdminApiDoc;
