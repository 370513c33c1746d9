use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::PreferredOs;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "developer_infos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub developer_since: TimeDate,
    pub preferred_os: PreferredOs,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::developer::Entity")]
    Developer,
}

impl Related<super::developer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Developer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
