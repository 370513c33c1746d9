pub mod developer;
pub mod developer_info;
pub mod project;
pub mod project_technology;
pub mod technology;
