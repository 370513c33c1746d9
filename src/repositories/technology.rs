use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entity::technology::{self, Column, Entity as TechnologyEntity};
use crate::error::{AppError, AppResult};
use crate::models::Technology;

/// Read-only access to the seeded technologies
pub struct TechnologyRepository;

impl TechnologyRepository {
    /// Find a technology by its canonical name
    pub async fn find_by_name<C>(db: &C, name: &str) -> AppResult<Technology>
    where
        C: ConnectionTrait,
    {
        let model = TechnologyEntity::find()
            .filter(Column::Name.eq(name))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Technology not found.".to_string()))?;

        Ok(model.into())
    }
}

impl From<technology::Model> for Technology {
    fn from(m: technology::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
