use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Generated at compile time from the `utoipa` annotations on the route
/// handlers and models. Served at `/api-docs/openapi.json` and rendered by
/// Swagger UI under `/swagger-ui/`.
///
/// # Endpoints
/// - Service Status: `GET /status`
#[derive(OpenApi)]
#[openapi(
    paths(crate::routes::status::get_status),
    components(schemas(
        crate::models::StatusReport,
        crate::models::DatabaseInfo,
        crate::models::DatabaseStatus,
        crate::models::HealthStatus,
        crate::models::SystemInfo,
        crate::models::MemoryInfo,
    )),
    tags(
        (name = "System", description = "Service status and health monitoring"),
    ),
    info(
        description = "Service status: database connectivity, uptime, runtime statistics",
        title = "KAI Backend API",
        version = "1.0.0",
    )
)]
pub struct ApiDoc;
