use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub estimated_time: String,
    #[sea_orm(column_type = "Text")]
    pub repository: String,
    pub start_date: TimeDate,
    pub end_date: Option<TimeDate>,
    pub developer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::developer::Entity",
        from = "Column::DeveloperId",
        to = "super::developer::Column::Id",
        on_delete = "Cascade"
    )]
    Developer,
    #[sea_orm(has_many = "super::project_technology::Entity")]
    ProjectTechnologies,
}

impl Related<super::developer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Developer.def()
    }
}

impl Related<super::project_technology::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectTechnologies.def()
    }
}

impl Related<super::technology::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_technology::Relation::Technology.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::project_technology::Relation::Project.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
