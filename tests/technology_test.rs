mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{Factory, TestApp};

#[tokio::test]
async fn test_attach_technology() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;
    let project = factory.create_project(developer.id).await;

    let response = app
        .server
        .post(&format!("/projects/{}/technologies", project.id))
        .json(&json!({ "name": "javascript" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["technologyId"].as_i64().is_some());
    assert_eq!(body["technologyName"], "JavaScript");
    assert!(body["addedIn"].as_str().is_some());
    assert_eq!(body["projectId"], project.id);
    assert_eq!(body["projectName"], project.name.as_str());
    assert_eq!(body["projectStartDate"], "2023-01-01");
}

#[tokio::test]
async fn test_attach_technology_twice() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;
    let project = factory.create_project(developer.id).await;
    factory.attach_technology(project.id, "MongoDB").await;

    let response = app
        .server
        .post(&format!("/projects/{}/technologies", project.id))
        .json(&json!({ "name": "MongoDB" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "Technology already added to this project.");

    let rows: Vec<Value> = app
        .server
        .get(&format!("/projects/{}", project.id))
        .await
        .json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["technologyName"], "MongoDB");
}

#[tokio::test]
async fn test_attach_unsupported_technology() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;
    let project = factory.create_project(developer.id).await;

    let response = app
        .server
        .post(&format!("/projects/{}/technologies", project.id))
        .json(&json!({ "name": "Rust" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Technology not supported.");
    assert_eq!(body["options"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_attach_technology_to_missing_project() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/projects/999999999/technologies")
        .json(&json!({ "name": "Python" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Project not found.");
}

#[tokio::test]
async fn test_detach_technology() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;
    let project = factory.create_project(developer.id).await;
    factory.attach_technology(project.id, "Python").await;

    let response = app
        .server
        .delete(&format!("/projects/{}/technologies/python", project.id))
        .await;

    response.assert_status_ok();
    assert!(response.text().is_empty());

    let response = app.server.get(&format!("/projects/{}", project.id)).await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["technologyName"].is_null());
}

#[tokio::test]
async fn test_detach_technology_not_attached() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;
    let project = factory.create_project(developer.id).await;

    let response = app
        .server
        .delete(&format!("/projects/{}/technologies/python", project.id))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(
        body["message"],
        "Technology 'Python' not found on this project."
    );
}

#[tokio::test]
async fn test_detach_unsupported_technology() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;
    let project = factory.create_project(developer.id).await;

    let response = app
        .server
        .delete(&format!("/projects/{}/technologies/cobol", project.id))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Technology not supported.");
    assert!(body["options"].is_array());
}
