use super::status::StatusQuery;
use crate::reporter::StatusReporter;
use async_graphql::{EmptyMutation, EmptySubscription, Schema};
use std::sync::Arc;

/// Main GraphQL Schema Definition
///
/// Query-only: `StatusQuery` is the root, mutations and subscriptions are
/// empty.
pub type AppSchema = Schema<StatusQuery, EmptyMutation, EmptySubscription>;

/// Creates the GraphQL schema, sharing `reporter` with the REST endpoint.
///
/// # Example
///
/// ```rust,no_run
/// use kai_backend::db::StaticProvider;
/// use kai_backend::graphql::schema::create_schema;
/// use kai_backend::reporter::{ProcessStartTime, StatusReporter};
/// use std::sync::Arc;
///
/// let reporter = Arc::new(StatusReporter::new(
///     ProcessStartTime::capture(),
///     Arc::new(StaticProvider::absent()),
/// ));
/// let schema = create_schema(reporter);
/// ```
pub fn create_schema(reporter: Arc<StatusReporter>) -> AppSchema {
    Schema::build(
        StatusQuery::default(),
        EmptyMutation::default(),
        EmptySubscription::default(),
    )
    .data(reporter)
    .finish()
}
