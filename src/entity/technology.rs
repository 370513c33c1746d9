use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Seeded lookup table; rows are never created through the API.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "technologies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_technology::Entity")]
    ProjectTechnologies,
}

impl Related<super::project_technology::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectTechnologies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
