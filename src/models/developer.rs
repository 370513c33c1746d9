use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

/// Operating systems a developer can declare as preferred.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PreferredOs {
    #[sea_orm(string_value = "Windows")]
    Windows,
    #[sea_orm(string_value = "Linux")]
    Linux,
    #[sea_orm(string_value = "MacOS")]
    #[serde(rename = "MacOS")]
    MacOs,
}

impl PreferredOs {
    pub const OPTIONS: &'static [&'static str] = &["Windows", "Linux", "MacOS"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Developer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub developer_info_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDeveloper {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDeveloper {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperInfo {
    pub id: i32,
    pub developer_since: Date,
    pub preferred_os: PreferredOs,
}

#[derive(Debug, Deserialize)]
pub struct CreateDeveloperInfo {
    pub developer_since: Date,
    pub preferred_os: PreferredOs,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDeveloperInfo {
    pub developer_since: Option<Date>,
    pub preferred_os: Option<PreferredOs>,
}

/// Developer left-joined with its info row; info columns are null when absent.
#[derive(Debug, Clone, FromQueryResult)]
pub struct DeveloperWithInfo {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub developer_since: Option<Date>,
    pub preferred_os: Option<PreferredOs>,
}

/// One project of a developer with its technology names folded into a
/// comma separated list.
#[derive(Debug, Clone, FromQueryResult)]
pub struct DeveloperProject {
    pub project_id: i32,
    pub project_name: String,
    pub description: String,
    pub estimated_time: String,
    pub repository: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub technologies: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DeveloperProjects {
    pub developer: Developer,
    pub projects: Vec<DeveloperProject>,
}
