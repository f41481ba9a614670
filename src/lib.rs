pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod models;
pub mod openapi;
pub mod reporter;
pub mod routes;
pub mod runtime_stats;
pub mod telemetry;
