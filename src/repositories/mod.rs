pub mod developer;
pub mod developer_info;
pub mod project;
pub mod technology;

pub use developer::DeveloperRepository;
pub use developer_info::DeveloperInfoRepository;
pub use project::ProjectRepository;
pub use technology::TechnologyRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::error::AppResult;

/// Base repository trait for entities addressed by an integer id
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Entity name used in "not found" messages
    const ENTITY: &'static str;

    /// Find entity by ID
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<T>;

    /// Check whether a row with this ID exists
    async fn exists(db: &DatabaseConnection, id: i32) -> AppResult<bool>;

    /// Delete entity by ID
    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()>;

    fn not_found() -> crate::error::AppError {
        crate::error::AppError::NotFound(format!("{} not found.", Self::ENTITY))
    }
}
