use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::middlewares::{BodyPolicy, Choice, Valid, ValidatedBody};
use crate::models::{
    iso_date, CreateDeveloper, CreateDeveloperInfo, Developer, DeveloperInfo, DeveloperProject,
    DeveloperWithInfo, PreferredOs, UpdateDeveloper, UpdateDeveloperInfo,
};
use crate::repositories::{DeveloperInfoRepository, DeveloperRepository, Repository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

const DEVELOPER_POLICY: BodyPolicy = BodyPolicy {
    required: &["name", "email"],
    optional: &[],
    forbidden: &["id"],
    dates: &[],
    choices: &[],
};

const DEVELOPER_INFO_POLICY: BodyPolicy = BodyPolicy {
    required: &["developerSince", "preferredOS"],
    optional: &[],
    forbidden: &["id"],
    dates: &["developerSince"],
    choices: &[Choice {
        key: "preferredOS",
        options: PreferredOs::OPTIONS,
        message: "Invalid OS option.",
    }],
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDeveloperRequest {
    pub name: String,
    pub email: String,
}

impl ValidatedBody for CreateDeveloperRequest {
    const POLICY: BodyPolicy = DEVELOPER_POLICY;
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDeveloperRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ValidatedBody for UpdateDeveloperRequest {
    const POLICY: BodyPolicy = DEVELOPER_POLICY;
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeveloperInfoRequest {
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub developer_since: Date,
    #[serde(rename = "preferredOS")]
    pub preferred_os: PreferredOs,
}

impl ValidatedBody for CreateDeveloperInfoRequest {
    const POLICY: BodyPolicy = DEVELOPER_INFO_POLICY;
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeveloperInfoRequest {
    #[serde(default, with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub developer_since: Option<Date>,
    #[serde(default, rename = "preferredOS")]
    pub preferred_os: Option<PreferredOs>,
}

impl ValidatedBody for UpdateDeveloperInfoRequest {
    const POLICY: BodyPolicy = DEVELOPER_INFO_POLICY;
}

/// Developer row as stored
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub developer_info_id: Option<i32>,
}

impl From<Developer> for DeveloperResponse {
    fn from(d: Developer) -> Self {
        Self {
            id: d.id,
            name: d.name,
            email: d.email,
            developer_info_id: d.developer_info_id,
        }
    }
}

/// Developer after an update; the info link is not exposed
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedDeveloperResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<Developer> for UpdatedDeveloperResponse {
    fn from(d: Developer) -> Self {
        Self {
            id: d.id,
            name: d.name,
            email: d.email,
        }
    }
}

/// Developer flattened with its info; info fields are null when absent
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperDetailResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub developer_since: Option<Date>,
    #[serde(rename = "preferredOS")]
    pub preferred_os: Option<PreferredOs>,
}

impl From<DeveloperWithInfo> for DeveloperDetailResponse {
    fn from(d: DeveloperWithInfo) -> Self {
        Self {
            id: d.id,
            name: d.name,
            email: d.email,
            developer_since: d.developer_since,
            preferred_os: d.preferred_os,
        }
    }
}

impl From<(Developer, DeveloperInfo)> for DeveloperDetailResponse {
    fn from((developer, info): (Developer, DeveloperInfo)) -> Self {
        Self {
            id: developer.id,
            name: developer.name,
            email: developer.email,
            developer_since: Some(info.developer_since),
            preferred_os: Some(info.preferred_os),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperInfoResponse {
    pub id: i32,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub developer_since: Date,
    #[serde(rename = "preferredOS")]
    pub preferred_os: PreferredOs,
}

impl From<DeveloperInfo> for DeveloperInfoResponse {
    fn from(i: DeveloperInfo) -> Self {
        Self {
            id: i.id,
            developer_since: i.developer_since,
            preferred_os: i.preferred_os,
        }
    }
}

/// One project of a developer; `technologies` is a comma separated list
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperProjectResponse {
    pub project_id: i32,
    pub project_name: String,
    pub description: String,
    pub estimated_time: String,
    pub repository: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub start_date: Date,
    #[serde(with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<Date>,
    pub technologies: Option<String>,
}

impl From<DeveloperProject> for DeveloperProjectResponse {
    fn from(p: DeveloperProject) -> Self {
        Self {
            project_id: p.project_id,
            project_name: p.project_name,
            description: p.description,
            estimated_time: p.estimated_time,
            repository: p.repository,
            start_date: p.start_date,
            end_date: p.end_date,
            technologies: p.technologies,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeveloperProjectsResponse {
    pub developer: DeveloperResponse,
    pub projects: Vec<DeveloperProjectResponse>,
}

// ============ Handlers ============

/// Create a new developer
#[utoipa::path(
    post,
    path = "/developers",
    request_body = CreateDeveloperRequest,
    responses(
        (status = 201, description = "Developer created successfully", body = DeveloperResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    ),
    tag = "Developers"
)]
pub async fn create_developer(
    State(state): State<AppState>,
    Valid(payload): Valid<CreateDeveloperRequest>,
) -> AppResult<(StatusCode, Json<DeveloperResponse>)> {
    let create_developer = CreateDeveloper {
        name: payload.name,
        email: payload.email,
    };

    let developer = DeveloperRepository::create(&state.db, &create_developer).await?;
    tracing::info!(developer_id = developer.id, "Developer created");

    Ok((StatusCode::CREATED, Json(developer.into())))
}

/// List all developers with their info
#[utoipa::path(
    get,
    path = "/developers",
    responses(
        (status = 200, description = "List of developers", body = Vec<DeveloperDetailResponse>)
    ),
    tag = "Developers"
)]
pub async fn list_developers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DeveloperDetailResponse>>> {
    let developers = DeveloperRepository::list_with_info(&state.db).await?;
    Ok(Json(developers.into_iter().map(|d| d.into()).collect()))
}

/// Get a developer by ID
#[utoipa::path(
    get,
    path = "/developers/{id}",
    params(
        ("id" = i32, Path, description = "Developer ID")
    ),
    responses(
        (status = 200, description = "Developer details", body = DeveloperDetailResponse),
        (status = 404, description = "Developer not found")
    ),
    tag = "Developers"
)]
pub async fn get_developer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeveloperDetailResponse>> {
    let developer = DeveloperRepository::find_with_info(&state.db, id).await?;
    Ok(Json(developer.into()))
}

/// Update a developer's name and/or email
#[utoipa::path(
    patch,
    path = "/developers/{id}",
    params(
        ("id" = i32, Path, description = "Developer ID")
    ),
    request_body = UpdateDeveloperRequest,
    responses(
        (status = 200, description = "Developer updated successfully", body = UpdatedDeveloperResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Developer not found"),
        (status = 409, description = "Email already exists")
    ),
    tag = "Developers"
)]
pub async fn update_developer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Valid(payload): Valid<UpdateDeveloperRequest>,
) -> AppResult<Json<UpdatedDeveloperResponse>> {
    let update_developer = UpdateDeveloper {
        name: payload.name,
        email: payload.email,
    };

    let developer = DeveloperRepository::update(&state.db, id, &update_developer).await?;
    Ok(Json(developer.into()))
}

/// Delete a developer together with its info and projects
#[utoipa::path(
    delete,
    path = "/developers/{id}",
    params(
        ("id" = i32, Path, description = "Developer ID")
    ),
    responses(
        (status = 200, description = "Developer deleted successfully"),
        (status = 404, description = "Developer not found")
    ),
    tag = "Developers"
)]
pub async fn delete_developer(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<()> {
    DeveloperRepository::delete(&state.db, id).await?;
    tracing::info!(developer_id = id, "Developer deleted");
    Ok(())
}

/// List a developer's projects with their technologies
#[utoipa::path(
    get,
    path = "/developers/{id}/projects",
    params(
        ("id" = i32, Path, description = "Developer ID")
    ),
    responses(
        (status = 200, description = "Developer with projects", body = DeveloperProjectsResponse),
        (status = 404, description = "Developer not found")
    ),
    tag = "Developers"
)]
pub async fn list_developer_projects(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeveloperProjectsResponse>> {
    let result = DeveloperRepository::projects(&state.db, id).await?;

    Ok(Json(DeveloperProjectsResponse {
        developer: result.developer.into(),
        projects: result.projects.into_iter().map(|p| p.into()).collect(),
    }))
}

/// Create the info of a developer
#[utoipa::path(
    post,
    path = "/developers/{id}/infos",
    params(
        ("id" = i32, Path, description = "Developer ID")
    ),
    request_body = CreateDeveloperInfoRequest,
    responses(
        (status = 201, description = "Developer info created successfully", body = DeveloperInfoResponse),
        (status = 400, description = "Validation error or info already exists"),
        (status = 404, description = "Developer not found")
    ),
    tag = "Developers"
)]
pub async fn create_developer_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Valid(payload): Valid<CreateDeveloperInfoRequest>,
) -> AppResult<(StatusCode, Json<DeveloperInfoResponse>)> {
    let create_info = CreateDeveloperInfo {
        developer_since: payload.developer_since,
        preferred_os: payload.preferred_os,
    };

    let info = DeveloperInfoRepository::create_for_developer(&state.db, id, &create_info).await?;
    tracing::info!(developer_id = id, info_id = info.id, "Developer info created");

    Ok((StatusCode::CREATED, Json(info.into())))
}

/// Update the info of a developer
#[utoipa::path(
    patch,
    path = "/developers/{id}/infos",
    params(
        ("id" = i32, Path, description = "Developer ID")
    ),
    request_body = UpdateDeveloperInfoRequest,
    responses(
        (status = 200, description = "Developer info updated successfully", body = DeveloperDetailResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Developer or developer info not found")
    ),
    tag = "Developers"
)]
pub async fn update_developer_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Valid(payload): Valid<UpdateDeveloperInfoRequest>,
) -> AppResult<Json<DeveloperDetailResponse>> {
    let update_info = UpdateDeveloperInfo {
        developer_since: payload.developer_since,
        preferred_os: payload.preferred_os,
    };

    let updated = DeveloperInfoRepository::update_for_developer(&state.db, id, &update_info).await?;
    Ok(Json(updated.into()))
}
