use actix_web::{App, HttpServer, middleware::Logger, web::Data};
use kai_backend::config::Config;
use kai_backend::db::StaticProvider;
use kai_backend::graphql::schema::create_schema;
use kai_backend::openapi::ApiDoc;
use kai_backend::reporter::{ProcessStartTime, SERVICE_NAME, StatusReporter};
use kai_backend::telemetry;
use stats_alloc::{INSTRUMENTED_SYSTEM, StatsAlloc};
use std::alloc::System;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

/// KAI Backend Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - `GET /status` service status endpoint
/// - GraphQL mirror of the status report under `/api/v1`
/// - Swagger UI for API documentation
///
/// # Endpoints
/// - Status: `/status`
/// - GraphQL: `/api/v1/graphql`
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// # Configuration
/// Environment variables, optionally from a `.env` file (see [`Config`]).
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let started_at = ProcessStartTime::capture();
    dotenv::dotenv().ok();

    let config = Config::from_env().map_err(std::io::Error::other)?;
    telemetry::init(config.log_format);

    let provider =
        StaticProvider::from_mongodb_uri(config.mongodb_uri.as_deref(), SERVICE_NAME).await;
    let reporter = Data::new(
        StatusReporter::new(started_at, Arc::new(provider)).with_ping_timeout(config.ping_timeout),
    );
    let schema = create_schema(reporter.clone().into_inner());

    tracing::info!(host = %config.host, port = config.port, "starting HTTP server");

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .wrap(Logger::default())
            .app_data(reporter.clone())
            .app_data(Data::new(schema.clone()))
            .configure(kai_backend::routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
