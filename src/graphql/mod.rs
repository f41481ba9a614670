pub mod handlers;
pub mod schema;
pub mod status;
