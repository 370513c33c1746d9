use std::time::Duration;

use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;

/// Requests running longer than `timeout` are answered with 503
pub fn request_timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::SERVICE_UNAVAILABLE, timeout)
}

#[cfg(test)]
mod tests {
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    use super::*;

    #[tokio::test]
    async fn test_slow_request_fails_closed() {
        let router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    "late"
                }),
            )
            .route("/fast", get(|| async { "ok" }))
            .layer(request_timeout_layer(Duration::from_millis(50)));
        let server = TestServer::new(router).expect("Failed to create test server");

        server
            .get("/slow")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
        server.get("/fast").await.assert_status_ok();
    }
}
