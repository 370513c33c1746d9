pub mod developer;
pub mod project;

pub use developer::{
    create_developer, create_developer_info, delete_developer, get_developer,
    list_developer_projects, list_developers, update_developer, update_developer_info,
    CreateDeveloperInfoRequest, CreateDeveloperRequest, DeveloperDetailResponse,
    DeveloperInfoResponse, DeveloperProjectResponse, DeveloperProjectsResponse, DeveloperResponse,
    UpdateDeveloperInfoRequest, UpdateDeveloperRequest, UpdatedDeveloperResponse,
};
pub use project::{
    attach_technology, create_project, delete_project, detach_technology, get_project,
    list_projects, update_project, AttachTechnologyRequest, AttachedTechnologyResponse,
    CreateProjectRequest, ProjectResponse, ProjectTechnologyResponse, UpdateProjectRequest,
};
