use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use devhub::config::Config;
use devhub::handlers::{
    AttachTechnologyRequest, AttachedTechnologyResponse, CreateDeveloperInfoRequest,
    CreateDeveloperRequest, CreateProjectRequest, DeveloperDetailResponse, DeveloperInfoResponse,
    DeveloperProjectResponse, DeveloperProjectsResponse, DeveloperResponse, ProjectResponse,
    ProjectTechnologyResponse, UpdateDeveloperInfoRequest, UpdateDeveloperRequest,
    UpdateProjectRequest, UpdatedDeveloperResponse,
};
use devhub::models::PreferredOs;
use devhub::state::AppState;
use devhub::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::developer::create_developer,
        handlers::developer::list_developers,
        handlers::developer::get_developer,
        handlers::developer::update_developer,
        handlers::developer::delete_developer,
        handlers::developer::list_developer_projects,
        handlers::developer::create_developer_info,
        handlers::developer::update_developer_info,
        handlers::project::create_project,
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::project::attach_technology,
        handlers::project::detach_technology,
    ),
    components(schemas(
        CreateDeveloperRequest,
        UpdateDeveloperRequest,
        DeveloperResponse,
        UpdatedDeveloperResponse,
        DeveloperDetailResponse,
        CreateDeveloperInfoRequest,
        UpdateDeveloperInfoRequest,
        DeveloperInfoResponse,
        DeveloperProjectResponse,
        DeveloperProjectsResponse,
        PreferredOs,
        CreateProjectRequest,
        UpdateProjectRequest,
        ProjectResponse,
        ProjectTechnologyResponse,
        AttachTechnologyRequest,
        AttachedTechnologyResponse,
    )),
    tags(
        (name = "Developers", description = "Developer and developer info endpoints"),
        (name = "Projects", description = "Project and technology endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (runs migrations)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
