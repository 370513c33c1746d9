use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::middlewares::{BodyPolicy, Choice, Valid, ValidatedBody};
use crate::models::{
    canonical_technology, iso_date, nullable_date, AttachedTechnology, CreateProject, Project,
    ProjectTechnologyRow, UpdateProject, TECHNOLOGIES,
};
use crate::repositories::{ProjectRepository, Repository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

const PROJECT_POLICY: BodyPolicy = BodyPolicy {
    required: &[
        "name",
        "description",
        "estimatedTime",
        "repository",
        "startDate",
        "developerId",
    ],
    optional: &["endDate"],
    forbidden: &["id"],
    dates: &["startDate", "endDate"],
    choices: &[],
};

const TECHNOLOGY_POLICY: BodyPolicy = BodyPolicy {
    required: &["name"],
    optional: &[],
    forbidden: &["id"],
    dates: &[],
    choices: &[Choice {
        key: "name",
        options: TECHNOLOGIES,
        message: "Technology not supported.",
    }],
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub estimated_time: String,
    pub repository: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub start_date: Date,
    #[serde(default, with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<Date>,
    pub developer_id: i32,
}

impl ValidatedBody for CreateProjectRequest {
    const POLICY: BodyPolicy = PROJECT_POLICY;
}

/// Partial project update; `"endDate": null` clears the end date
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub repository: Option<String>,
    #[serde(default, with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<Date>,
    #[serde(default, deserialize_with = "nullable_date")]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<Option<Date>>,
    pub developer_id: Option<i32>,
}

impl ValidatedBody for UpdateProjectRequest {
    const POLICY: BodyPolicy = PROJECT_POLICY;
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachTechnologyRequest {
    pub name: String,
}

impl ValidatedBody for AttachTechnologyRequest {
    const POLICY: BodyPolicy = TECHNOLOGY_POLICY;
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub estimated_time: String,
    pub repository: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub start_date: Date,
    #[serde(with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<Date>,
    pub developer_id: i32,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            estimated_time: p.estimated_time,
            repository: p.repository,
            start_date: p.start_date,
            end_date: p.end_date,
            developer_id: p.developer_id,
        }
    }
}

/// A project paired with one of its technologies
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTechnologyResponse {
    pub project_id: i32,
    pub project_name: String,
    pub project_description: String,
    pub project_estimated_time: String,
    pub project_repository: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub project_start_date: Date,
    #[serde(with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub project_end_date: Option<Date>,
    pub project_developer_id: i32,
    pub technology_id: Option<i32>,
    pub technology_name: Option<String>,
}

impl From<ProjectTechnologyRow> for ProjectTechnologyResponse {
    fn from(r: ProjectTechnologyRow) -> Self {
        Self {
            project_id: r.project_id,
            project_name: r.project_name,
            project_description: r.project_description,
            project_estimated_time: r.project_estimated_time,
            project_repository: r.project_repository,
            project_start_date: r.project_start_date,
            project_end_date: r.project_end_date,
            project_developer_id: r.project_developer_id,
            technology_id: r.technology_id,
            technology_name: r.technology_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachedTechnologyResponse {
    pub technology_id: i32,
    pub technology_name: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub added_in: OffsetDateTime,
    pub project_id: i32,
    pub project_name: String,
    pub project_description: String,
    pub project_estimated_time: String,
    pub project_repository: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub project_start_date: Date,
    #[serde(with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub project_end_date: Option<Date>,
}

impl From<AttachedTechnology> for AttachedTechnologyResponse {
    fn from(a: AttachedTechnology) -> Self {
        Self {
            technology_id: a.technology_id,
            technology_name: a.technology_name,
            added_in: a.added_in,
            project_id: a.project.id,
            project_name: a.project.name,
            project_description: a.project.description,
            project_estimated_time: a.project.estimated_time,
            project_repository: a.project.repository,
            project_start_date: a.project.start_date,
            project_end_date: a.project.end_date,
        }
    }
}

// ============ Handlers ============

/// Create a new project for an existing developer
#[utoipa::path(
    post,
    path = "/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created successfully", body = ProjectResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Developer not found")
    ),
    tag = "Projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    Valid(payload): Valid<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    let create_project = CreateProject {
        name: payload.name,
        description: payload.description,
        estimated_time: payload.estimated_time,
        repository: payload.repository,
        start_date: payload.start_date,
        end_date: payload.end_date,
        developer_id: payload.developer_id,
    };

    let project = ProjectRepository::create(&state.db, &create_project).await?;
    tracing::info!(
        project_id = project.id,
        developer_id = project.developer_id,
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// List all projects, one row per attached technology
#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "Projects with technologies", body = Vec<ProjectTechnologyResponse>)
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectTechnologyResponse>>> {
    let rows = ProjectRepository::list_with_technologies(&state.db).await?;
    Ok(Json(rows.into_iter().map(|r| r.into()).collect()))
}

/// Get a project by ID, one row per attached technology
#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project with technologies", body = Vec<ProjectTechnologyResponse>),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ProjectTechnologyResponse>>> {
    let rows = ProjectRepository::find_with_technologies(&state.db, id).await?;
    Ok(Json(rows.into_iter().map(|r| r.into()).collect()))
}

/// Update a project
#[utoipa::path(
    patch,
    path = "/projects/{id}",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Project or developer not found")
    ),
    tag = "Projects"
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Valid(payload): Valid<UpdateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let update_project = UpdateProject {
        name: payload.name,
        description: payload.description,
        estimated_time: payload.estimated_time,
        repository: payload.repository,
        start_date: payload.start_date,
        end_date: payload.end_date,
        developer_id: payload.developer_id,
    };

    let project = ProjectRepository::update(&state.db, id, &update_project).await?;
    Ok(Json(project.into()))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/projects/{id}",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted successfully"),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects"
)]
pub async fn delete_project(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<()> {
    ProjectRepository::delete(&state.db, id).await?;
    tracing::info!(project_id = id, "Project deleted");
    Ok(())
}

/// Attach a technology to a project
#[utoipa::path(
    post,
    path = "/projects/{id}/technologies",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    request_body = AttachTechnologyRequest,
    responses(
        (status = 201, description = "Technology attached", body = AttachedTechnologyResponse),
        (status = 400, description = "Technology not supported"),
        (status = 404, description = "Project or technology not found"),
        (status = 409, description = "Technology already attached")
    ),
    tag = "Projects"
)]
pub async fn attach_technology(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Valid(payload): Valid<AttachTechnologyRequest>,
) -> AppResult<(StatusCode, Json<AttachedTechnologyResponse>)> {
    let attached = ProjectRepository::attach_technology(&state.db, id, &payload.name).await?;
    tracing::info!(project_id = id, technology = %attached.technology_name, "Technology attached");

    Ok((StatusCode::CREATED, Json(attached.into())))
}

/// Detach a technology from a project; the name is matched case-insensitively
#[utoipa::path(
    delete,
    path = "/projects/{id}/technologies/{name}",
    params(
        ("id" = i32, Path, description = "Project ID"),
        ("name" = String, Path, description = "Technology name")
    ),
    responses(
        (status = 200, description = "Technology detached"),
        (status = 404, description = "Technology not supported or not attached")
    ),
    tag = "Projects"
)]
pub async fn detach_technology(
    State(state): State<AppState>,
    Path((id, name)): Path<(i32, String)>,
) -> AppResult<()> {
    let name = canonical_technology(&name).ok_or_else(|| AppError::Unsupported {
        message: "Technology not supported.".to_string(),
        options: TECHNOLOGIES,
    })?;

    ProjectRepository::detach_technology(&state.db, id, name).await?;
    tracing::info!(project_id = id, technology = name, "Technology detached");
    Ok(())
}
