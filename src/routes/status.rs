use crate::reporter::StatusReporter;
use actix_web::{HttpResponse, Responder, get, web};

/// # Service Status Endpoint
///
/// Reports database connectivity, uptime, and runtime statistics.
///
/// ## Response
///
/// - **200 OK**: database reachable, `status` is `healthy`
/// - **503 Service Unavailable**: no database client, ping error, or ping
///   timeout; `status` is `unhealthy` and the full report is still returned
///
/// Both bodies are a [`StatusReport`](crate::models::StatusReport).
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Service status", body = crate::models::StatusReport),
        (status = 503, description = "Service unavailable", body = crate::models::StatusReport)
    ),
    tag = "System"
)]
#[get("/status")]
pub async fn get_status(reporter: web::Data<StatusReporter>) -> impl Responder {
    let report = reporter.report().await;

    if report.is_healthy() {
        HttpResponse::Ok().json(report)
    } else {
        HttpResponse::ServiceUnavailable().json(report)
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ClientHandle, DatabaseClient, StaticProvider};
    use crate::error::DatabaseError;
    use crate::reporter::ProcessStartTime;
    use actix_web::{App, http::StatusCode, test};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;

    struct FixedClient(Result<(), DatabaseError>);

    #[async_trait]
    impl DatabaseClient for FixedClient {
        async fn ping(&self) -> Result<(), DatabaseError> {
            self.0.clone()
        }
    }

    fn reporter(handle: ClientHandle) -> web::Data<StatusReporter> {
        web::Data::new(StatusReporter::new(
            ProcessStartTime::capture(),
            Arc::new(StaticProvider::new(handle)),
        ))
    }

    async fn call_status(reporter: web::Data<StatusReporter>) -> (StatusCode, Value) {
        let app =
            test::init_service(App::new().app_data(reporter).configure(configure_routes)).await;
        let req = test::TestRequest::get().uri("/status").to_request();
        let resp = test::call_service(&app, req).await;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get("content-type")
            .expect("Content-Type header should be present")
            .clone();
        assert_eq!(content_type, "application/json");

        let body = test::read_body(resp).await;
        let json: Value = serde_json::from_slice(&body).expect("Body should be valid JSON");
        (status, json)
    }

    #[actix_web::test]
    async fn test_connected_database_returns_200() {
        // Arrange
        let handle = ClientHandle::Present(Arc::new(FixedClient(Ok(()))));

        // Act
        let (status, body) = call_status(reporter(handle)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"]["status"], "connected");
        assert!(body["database"].get("error").is_none());
    }

    #[actix_web::test]
    async fn test_absent_client_returns_503_without_error() {
        let (status, body) = call_status(reporter(ClientHandle::Absent)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["database"]["status"], "disconnected");
        assert!(body["database"].get("error").is_none());
    }

    #[actix_web::test]
    async fn test_ping_failure_returns_503_with_error() {
        let (status, body) = call_status(reporter(ClientHandle::Present(Arc::new(
            FixedClient(Err(DatabaseError::Ping("connection refused".to_string()))),
        ))))
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["database"]["status"], "disconnected");
        assert_eq!(body["database"]["error"], "connection refused");
    }

    #[actix_web::test]
    async fn test_unhealthy_body_keeps_full_shape() {
        let (_, body) = call_status(reporter(ClientHandle::Absent)).await;

        assert_eq!(body["service"], "kai-backend");
        assert_eq!(body["database"]["type"], "mongodb");
        assert!(body["uptime"].as_str().is_some_and(|u| u.ends_with('s')));
        assert!(
            chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok()
        );
        for key in ["alloc_mb", "total_alloc_mb", "sys_mb"] {
            assert!(
                body["system"]["memory"][key].is_u64(),
                "{key} should be a non-negative integer"
            );
        }
        assert!(body["system"]["num_cpu"].as_u64().unwrap() >= 1);
        assert!(
            body["system"]["rust_version"]
                .as_str()
                .is_some_and(|v| v.starts_with(|c: char| c.is_ascii_digit())),
            "rust_version should be the toolchain version"
        );
    }

    #[actix_web::test]
    async fn test_status_field_matches_http_code() {
        let handles = [
            ClientHandle::Absent,
            ClientHandle::Present(Arc::new(FixedClient(Ok(())))),
            ClientHandle::Present(Arc::new(FixedClient(Err(DatabaseError::Ping(
                "auth failed".to_string(),
            ))))),
        ];

        for handle in handles {
            let (status, body) = call_status(reporter(handle)).await;
            let healthy = body["status"] == "healthy";
            let connected = body["database"]["status"] == "connected";

            assert_eq!(healthy, status == StatusCode::OK);
            assert_eq!(!healthy, status == StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(connected, healthy);
        }
    }
}
