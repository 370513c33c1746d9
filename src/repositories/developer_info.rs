use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, NotSet, QuerySelect,
    Set, TransactionTrait,
};

use crate::entity::developer::{self, Entity as DeveloperEntity};
use crate::entity::developer_info::{self, ActiveModel, Entity as DeveloperInfoEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateDeveloperInfo, Developer, DeveloperInfo, UpdateDeveloperInfo};
use crate::repositories::{DeveloperRepository, Repository};

/// Repository for the optional one-to-one info row of a developer
pub struct DeveloperInfoRepository;

impl DeveloperInfoRepository {
    /// Create the info row and link it to the developer. A developer can
    /// only ever have one info row.
    pub async fn create_for_developer(
        db: &DatabaseConnection,
        developer_id: i32,
        input: &CreateDeveloperInfo,
    ) -> AppResult<DeveloperInfo> {
        let txn = db.begin().await?;

        let developer = lock_developer(&txn, developer_id).await?;
        if developer.developer_info_id.is_some() {
            return Err(AppError::Validation(
                "Developer infos already exists.".to_string(),
            ));
        }

        let info = ActiveModel {
            id: NotSet,
            developer_since: Set(input.developer_since),
            preferred_os: Set(input.preferred_os),
        }
        .insert(&txn)
        .await?;

        let mut active: developer::ActiveModel = developer.into();
        active.developer_info_id = Set(Some(info.id));
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(info.into())
    }

    /// Partial update of the developer's info row
    pub async fn update_for_developer(
        db: &DatabaseConnection,
        developer_id: i32,
        input: &UpdateDeveloperInfo,
    ) -> AppResult<(Developer, DeveloperInfo)> {
        let txn = db.begin().await?;

        let developer = lock_developer(&txn, developer_id).await?;
        let info = match developer.developer_info_id {
            Some(info_id) => DeveloperInfoEntity::find_by_id(info_id).one(&txn).await?,
            None => None,
        }
        .ok_or_else(info_not_found)?;

        let mut active: ActiveModel = info.into();

        if let Some(developer_since) = input.developer_since {
            active.developer_since = Set(developer_since);
        }
        if let Some(preferred_os) = input.preferred_os {
            active.preferred_os = Set(preferred_os);
        }

        let info = active.update(&txn).await?;

        txn.commit().await?;
        Ok((developer.into(), info.into()))
    }
}

/// `SELECT ... FOR UPDATE` on the developer so concurrent info writes serialize
async fn lock_developer(txn: &DatabaseTransaction, id: i32) -> AppResult<developer::Model> {
    DeveloperEntity::find_by_id(id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(DeveloperRepository::not_found)
}

fn info_not_found() -> AppError {
    AppError::NotFound("Developer infos not found.".to_string())
}

// Conversion from SeaORM model to our domain model
impl From<developer_info::Model> for DeveloperInfo {
    fn from(m: developer_info::Model) -> Self {
        Self {
            id: m.id,
            developer_since: m.developer_since,
            preferred_os: m.preferred_os,
        }
    }
}
