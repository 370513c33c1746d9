use time::macros::date;
use uuid::Uuid;

use devhub::models::{
    CreateDeveloper, CreateDeveloperInfo, CreateProject, Developer, DeveloperInfo, PreferredOs,
    Project,
};
use devhub::repositories::{DeveloperInfoRepository, DeveloperRepository, ProjectRepository};
use devhub::state::AppState;

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// An email no other test will use
    pub fn unique_email() -> String {
        format!("dev-{}@example.com", Uuid::new_v4())
    }

    /// Create a developer without info
    pub async fn create_developer(&self) -> Developer {
        let input = CreateDeveloper {
            name: "Test Developer".to_string(),
            email: Self::unique_email(),
        };

        DeveloperRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Create the info row for a developer
    pub async fn create_developer_info(&self, developer_id: i32) -> DeveloperInfo {
        let input = CreateDeveloperInfo {
            developer_since: date!(2020 - 05 - 17),
            preferred_os: PreferredOs::Linux,
        };

        DeveloperInfoRepository::create_for_developer(&self.state.db, developer_id, &input)
            .await
            .unwrap()
    }

    /// Create a project owned by a developer
    pub async fn create_project(&self, developer_id: i32) -> Project {
        let input = CreateProject {
            name: format!("Project {}", Uuid::new_v4()),
            description: "A test project".to_string(),
            estimated_time: "2 weeks".to_string(),
            repository: "https://example.com/repo.git".to_string(),
            start_date: date!(2023 - 01 - 01),
            end_date: None,
            developer_id,
        };

        ProjectRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Attach a technology to a project by name
    pub async fn attach_technology(&self, project_id: i32, name: &str) {
        ProjectRepository::attach_technology(&self.state.db, project_id, name)
            .await
            .unwrap();
    }
}
