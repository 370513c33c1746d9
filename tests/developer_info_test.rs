mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_developer_info() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;

    let response = app
        .server
        .post(&format!("/developers/{}/infos", developer.id))
        .json(&json!({ "developerSince": "2013-01-01T10:00:00Z", "preferredOS": "macos" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["developerSince"], "2013-01-01");
    assert_eq!(body["preferredOS"], "MacOS");

    let response = app.server.get(&format!("/developers/{}", developer.id)).await;
    let detail: Value = response.json();
    assert_eq!(detail["preferredOS"], "MacOS");
}

#[tokio::test]
async fn test_create_developer_info_twice() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;
    factory.create_developer_info(developer.id).await;

    let response = app
        .server
        .post(&format!("/developers/{}/infos", developer.id))
        .json(&json!({ "developerSince": "2015-02-02", "preferredOS": "Windows" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Developer infos already exists.");
}

#[tokio::test]
async fn test_create_developer_info_invalid_os() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;

    let response = app
        .server
        .post(&format!("/developers/{}/infos", developer.id))
        .json(&json!({ "developerSince": "2015-02-02", "preferredOS": "Solaris" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid OS option.");
    assert_eq!(body["options"], json!(["Windows", "Linux", "MacOS"]));
}

#[tokio::test]
async fn test_create_developer_info_invalid_date() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;

    let response = app
        .server
        .post(&format!("/developers/{}/infos", developer.id))
        .json(&json!({ "developerSince": "not a date", "preferredOS": "Linux" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid date for key: developerSince.");
}

#[tokio::test]
async fn test_create_developer_info_for_missing_developer() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/developers/999999999/infos")
        .json(&json!({ "developerSince": "2015-02-02", "preferredOS": "Linux" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Developer not found.");
}

#[tokio::test]
async fn test_update_developer_info() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;
    factory.create_developer_info(developer.id).await;

    let response = app
        .server
        .patch(&format!("/developers/{}/infos", developer.id))
        .json(&json!({ "preferredOS": "Windows" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], developer.id);
    assert_eq!(body["email"], developer.email.as_str());
    assert_eq!(body["developerSince"], "2020-05-17");
    assert_eq!(body["preferredOS"], "Windows");
}

#[tokio::test]
async fn test_update_developer_info_without_info() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let developer = factory.create_developer().await;

    let response = app
        .server
        .patch(&format!("/developers/{}/infos", developer.id))
        .json(&json!({ "preferredOS": "Windows" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Developer infos not found.");
}
