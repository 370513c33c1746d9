use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use crate::entity::project::{self, ActiveModel, Column, Entity as ProjectEntity};
use crate::entity::project_technology::{
    self, Column as LinkColumn, Entity as ProjectTechnologyEntity,
};
use crate::entity::technology::Column as TechnologyColumn;
use crate::error::{AppError, AppResult, Constraint, DbResultExt};
use crate::models::{
    AttachedTechnology, CreateProject, Project, ProjectTechnologyRow, UpdateProject,
};
use crate::repositories::{DeveloperRepository, Repository, TechnologyRepository};

/// Project repository for database operations
pub struct ProjectRepository;

#[async_trait]
impl Repository<Project> for ProjectRepository {
    const ENTITY: &'static str = "Project";

    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(Self::not_found)?;

        Ok(model.into())
    }

    async fn exists(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let count = ProjectEntity::find()
            .filter(Column::Id.eq(id))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Technology links are removed by `ON DELETE CASCADE`
    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let result = ProjectEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(Self::not_found());
        }

        Ok(())
    }
}

impl ProjectRepository {
    /// Create a new project for an existing developer
    pub async fn create(db: &DatabaseConnection, input: &CreateProject) -> AppResult<Project> {
        if !DeveloperRepository::exists(db, input.developer_id).await? {
            return Err(DeveloperRepository::not_found());
        }

        let model = ActiveModel {
            id: NotSet,
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            estimated_time: Set(input.estimated_time.clone()),
            repository: Set(input.repository.clone()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            developer_id: Set(input.developer_id),
        };

        // The developer may vanish between the check and the insert
        let result = model
            .insert(db)
            .await
            .on_constraint(Constraint::ForeignKey, DeveloperRepository::not_found)?;

        Ok(result.into())
    }

    /// Partial update; moving the project to an unknown developer is a 404
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: &UpdateProject,
    ) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(Self::not_found)?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(description) = &input.description {
            active.description = Set(description.clone());
        }
        if let Some(estimated_time) = &input.estimated_time {
            active.estimated_time = Set(estimated_time.clone());
        }
        if let Some(repository) = &input.repository {
            active.repository = Set(repository.clone());
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = input.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(developer_id) = input.developer_id {
            active.developer_id = Set(developer_id);
        }

        let result = active.update(db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => Self::not_found(),
            e => AppError::from_db(e, Constraint::ForeignKey, DeveloperRepository::not_found),
        })?;

        Ok(result.into())
    }

    /// One row per attached technology of the project
    pub async fn find_with_technologies(
        db: &DatabaseConnection,
        id: i32,
    ) -> AppResult<Vec<ProjectTechnologyRow>> {
        let rows = with_technologies_query()
            .filter(Column::Id.eq(id))
            .order_by_asc(TechnologyColumn::Name)
            .into_model::<ProjectTechnologyRow>()
            .all(db)
            .await?;

        if rows.is_empty() {
            return Err(Self::not_found());
        }

        Ok(rows)
    }

    /// One row per (project, technology) pair across all projects
    pub async fn list_with_technologies(
        db: &DatabaseConnection,
    ) -> AppResult<Vec<ProjectTechnologyRow>> {
        let rows = with_technologies_query()
            .order_by_asc(Column::Id)
            .order_by_asc(TechnologyColumn::Name)
            .into_model::<ProjectTechnologyRow>()
            .all(db)
            .await?;

        Ok(rows)
    }

    /// Link a seeded technology to the project, stamping `added_in` with now
    pub async fn attach_technology(
        db: &DatabaseConnection,
        project_id: i32,
        name: &str,
    ) -> AppResult<AttachedTechnology> {
        let project = Self::find_by_id(db, project_id).await?;
        let technology = TechnologyRepository::find_by_name(db, name).await?;

        let existing = ProjectTechnologyEntity::find()
            .filter(LinkColumn::ProjectId.eq(project_id))
            .filter(LinkColumn::TechnologyId.eq(technology.id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(already_attached());
        }

        let link = project_technology::ActiveModel {
            id: NotSet,
            added_in: Set(time::OffsetDateTime::now_utc()),
            project_id: Set(project_id),
            technology_id: Set(technology.id),
        };

        // The unique (project_id, technology_id) pair settles concurrent attaches
        let link = link.insert(db).await.map_err(|e| match Constraint::of(&e) {
            Some(Constraint::Unique) => already_attached(),
            Some(Constraint::ForeignKey) => Self::not_found(),
            None => e.into(),
        })?;

        Ok(AttachedTechnology {
            technology_id: technology.id,
            technology_name: technology.name,
            added_in: link.added_in,
            project,
        })
    }

    /// Remove the link between the project and a technology
    pub async fn detach_technology(
        db: &DatabaseConnection,
        project_id: i32,
        name: &str,
    ) -> AppResult<()> {
        let technology = TechnologyRepository::find_by_name(db, name).await?;

        let result = ProjectTechnologyEntity::delete_many()
            .filter(LinkColumn::ProjectId.eq(project_id))
            .filter(LinkColumn::TechnologyId.eq(technology.id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Technology '{}' not found on this project.",
                technology.name
            )));
        }

        Ok(())
    }
}

fn with_technologies_query() -> Select<ProjectEntity> {
    ProjectEntity::find()
        .select_only()
        .column_as(Column::Id, "project_id")
        .column_as(Column::Name, "project_name")
        .column_as(Column::Description, "project_description")
        .column_as(Column::EstimatedTime, "project_estimated_time")
        .column_as(Column::Repository, "project_repository")
        .column_as(Column::StartDate, "project_start_date")
        .column_as(Column::EndDate, "project_end_date")
        .column_as(Column::DeveloperId, "project_developer_id")
        .column_as(TechnologyColumn::Id, "technology_id")
        .column_as(TechnologyColumn::Name, "technology_name")
        .join(JoinType::LeftJoin, project::Relation::ProjectTechnologies.def())
        .join(
            JoinType::LeftJoin,
            project_technology::Relation::Technology.def(),
        )
}

fn already_attached() -> AppError {
    AppError::Conflict("Technology already added to this project.".to_string())
}

// Conversion from SeaORM model to our domain model
impl From<project::Model> for Project {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            estimated_time: m.estimated_time,
            repository: m.repository,
            start_date: m.start_date,
            end_date: m.end_date,
            developer_id: m.developer_id,
        }
    }
}
