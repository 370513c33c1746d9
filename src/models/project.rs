use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub estimated_time: String,
    pub repository: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub developer_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub estimated_time: String,
    pub repository: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub developer_id: i32,
}

/// Partial project update. `end_date: Some(None)` clears the end date.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub repository: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Option<Date>>,
    pub developer_id: Option<i32>,
}

/// A project joined with one of its technologies. Projects without any
/// technology produce a single row with null technology columns.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ProjectTechnologyRow {
    pub project_id: i32,
    pub project_name: String,
    pub project_description: String,
    pub project_estimated_time: String,
    pub project_repository: String,
    pub project_start_date: Date,
    pub project_end_date: Option<Date>,
    pub project_developer_id: i32,
    pub technology_id: Option<i32>,
    pub technology_name: Option<String>,
}

/// Result of attaching a technology to a project.
#[derive(Debug, Clone)]
pub struct AttachedTechnology {
    pub technology_id: i32,
    pub technology_name: String,
    pub added_in: OffsetDateTime,
    pub project: Project,
}
