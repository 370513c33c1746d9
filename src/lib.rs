// Library crate for devhub
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod state;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    attach_technology, create_developer, create_developer_info, create_project, delete_developer,
    delete_project, detach_technology, get_developer, get_project, list_developer_projects,
    list_developers, list_projects, update_developer, update_developer_info, update_project,
};
use crate::middlewares::{ensure_exists, request_timeout_layer};
use crate::models::{Developer, Project};
use crate::repositories::{DeveloperRepository, ProjectRepository};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Routes addressing an existing developer
    let developer_routes = Router::new()
        .route("/developers/{id}", get(get_developer))
        .route("/developers/{id}", patch(update_developer))
        .route("/developers/{id}", delete(delete_developer))
        .route("/developers/{id}/projects", get(list_developer_projects))
        .route("/developers/{id}/infos", post(create_developer_info))
        .route("/developers/{id}/infos", patch(update_developer_info))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            ensure_exists::<DeveloperRepository, Developer>,
        ));

    // Routes addressing an existing project
    let project_routes = Router::new()
        .route("/projects/{id}", get(get_project))
        .route("/projects/{id}", patch(update_project))
        .route("/projects/{id}", delete(delete_project))
        .route("/projects/{id}/technologies", post(attach_technology))
        .route(
            "/projects/{id}/technologies/{name}",
            delete(detach_technology),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            ensure_exists::<ProjectRepository, Project>,
        ));

    // Outermost first: trace spans cover timed-out requests too
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(request_timeout_layer(state.config.request_timeout()));

    Router::new()
        .route("/", get(|| async { "Hello, devhub!" }))
        .route("/developers", get(list_developers))
        .route("/developers", post(create_developer))
        .route("/projects", get(list_projects))
        .route("/projects", post(create_project))
        .merge(developer_routes)
        .merge(project_routes)
        .layer(layers)
        .with_state(state)
}
