use actix_web::web;

/// # Service Status Endpoint
///
/// `GET /status` reports database connectivity, uptime, and runtime
/// statistics. Answers 200 when the database is reachable, 503 otherwise.
pub mod status;

/// # GraphQL Endpoints
///
/// `POST /graphql` executes queries against the status schema and
/// `GET /playground` serves the interactive playground.
pub mod graphql;

/// # Route Configuration
///
/// ## Example Endpoints
///
/// ```text
/// GET  /status              - Service status report
/// POST /api/v1/graphql      - GraphQL endpoint
/// GET  /api/v1/playground   - GraphQL playground
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(status::configure_routes)
        .service(web::scope("/api/v1").configure(graphql::configure_routes));
}
