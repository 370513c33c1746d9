use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult,
    JoinType, NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    Statement, TransactionTrait,
};

use crate::entity::developer::{self, ActiveModel, Column, Entity as DeveloperEntity};
use crate::entity::developer_info::{Column as InfoColumn, Entity as DeveloperInfoEntity};
use crate::error::{AppError, AppResult, Constraint, DbResultExt};
use crate::models::{
    CreateDeveloper, Developer, DeveloperProject, DeveloperProjects, DeveloperWithInfo,
    UpdateDeveloper,
};
use crate::repositories::Repository;

const DEVELOPER_PROJECTS_SQL: &str = r#"
    SELECT
        p.id AS project_id,
        p.name AS project_name,
        p.description,
        p.estimated_time,
        p.repository,
        p.start_date,
        p.end_date,
        string_agg(DISTINCT t.name, ',' ORDER BY t.name) AS technologies
    FROM
        projects p
    LEFT JOIN
        projects_technologies pt ON pt.project_id = p.id
    LEFT JOIN
        technologies t ON t.id = pt.technology_id
    WHERE
        p.developer_id = $1
    GROUP BY
        p.id
    ORDER BY
        p.id
"#;

/// Developer repository for database operations
pub struct DeveloperRepository;

#[async_trait]
impl Repository<Developer> for DeveloperRepository {
    const ENTITY: &'static str = "Developer";

    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Developer> {
        let model = DeveloperEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(Self::not_found)?;

        Ok(model.into())
    }

    async fn exists(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
        let count = DeveloperEntity::find()
            .filter(Column::Id.eq(id))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Deletes the developer and its info row together. Projects and their
    /// technology links go with the developer through `ON DELETE CASCADE`.
    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let txn = db.begin().await?;

        let model = DeveloperEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(Self::not_found)?;

        DeveloperEntity::delete_by_id(model.id).exec(&txn).await?;

        if let Some(info_id) = model.developer_info_id {
            DeveloperInfoEntity::delete_by_id(info_id).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

impl DeveloperRepository {
    /// Create a new developer
    pub async fn create(db: &DatabaseConnection, input: &CreateDeveloper) -> AppResult<Developer> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(input.name.clone()),
            email: Set(input.email.clone()),
            developer_info_id: Set(None),
        };

        let result = model
            .insert(db)
            .await
            .on_constraint(Constraint::Unique, email_taken)?;

        Ok(result.into())
    }

    /// Developer left-joined with its info
    pub async fn find_with_info(db: &DatabaseConnection, id: i32) -> AppResult<DeveloperWithInfo> {
        with_info_query()
            .filter(Column::Id.eq(id))
            .into_model::<DeveloperWithInfo>()
            .one(db)
            .await?
            .ok_or_else(Self::not_found)
    }

    /// All developers left-joined with their info
    pub async fn list_with_info(db: &DatabaseConnection) -> AppResult<Vec<DeveloperWithInfo>> {
        let rows = with_info_query()
            .order_by_asc(Column::Id)
            .into_model::<DeveloperWithInfo>()
            .all(db)
            .await?;

        Ok(rows)
    }

    /// Partial update of name and/or email
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: &UpdateDeveloper,
    ) -> AppResult<Developer> {
        let model = DeveloperEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(Self::not_found)?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(email) = &input.email {
            active.email = Set(email.clone());
        }

        let result = active.update(db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => Self::not_found(),
            e => AppError::from_db(e, Constraint::Unique, email_taken),
        })?;

        Ok(result.into())
    }

    /// The developer with every project it owns and the technologies used
    pub async fn projects(db: &DatabaseConnection, id: i32) -> AppResult<DeveloperProjects> {
        let developer = Self::find_by_id(db, id).await?;

        let projects = DeveloperProject::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            DEVELOPER_PROJECTS_SQL,
            [id.into()],
        ))
        .all(db)
        .await?;

        Ok(DeveloperProjects {
            developer,
            projects,
        })
    }
}

fn with_info_query() -> sea_orm::Select<DeveloperEntity> {
    DeveloperEntity::find()
        .select_only()
        .column(Column::Id)
        .column(Column::Name)
        .column(Column::Email)
        .column(InfoColumn::DeveloperSince)
        .column(InfoColumn::PreferredOs)
        .join(JoinType::LeftJoin, developer::Relation::DeveloperInfo.def())
}

fn email_taken() -> AppError {
    AppError::Conflict("Email already exists.".to_string())
}

// Conversion from SeaORM model to our domain model
impl From<developer::Model> for Developer {
    fn from(m: developer::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            developer_info_id: m.developer_info_id,
        }
    }
}
