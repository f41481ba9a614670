use crate::error::DatabaseError;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use std::sync::Arc;

/// Reported in `database.type` of every status report.
pub const DATABASE_TYPE: &str = "mongodb";

/// A database connection that can be probed for reachability.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Issues a lightweight round-trip to the server. Reads and writes no
    /// application data.
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// The outcome of asking for a database client: either one is configured or
/// none is.
#[derive(Clone)]
pub enum ClientHandle {
    Present(Arc<dyn DatabaseClient>),
    Absent,
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientHandle::Present(_) => f.write_str("Present(..)"),
            ClientHandle::Absent => f.write_str("Absent"),
        }
    }
}

/// Source of the shared database client handle.
pub trait ClientProvider: Send + Sync {
    fn client(&self) -> ClientHandle;
}

/// Provider that hands out a handle fixed at startup.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    handle: ClientHandle,
}

impl StaticProvider {
    pub fn new(handle: ClientHandle) -> Self {
        Self { handle }
    }

    pub fn absent() -> Self {
        Self::new(ClientHandle::Absent)
    }

    /// # Provider From MongoDB URI
    ///
    /// Builds a provider for the given MongoDB URI.
    ///
    /// No URI, or a URI the driver rejects, yields an [`ClientHandle::Absent`]
    /// provider so the service can still start and report itself unhealthy.
    pub async fn from_mongodb_uri(uri: Option<&str>, app_name: &str) -> Self {
        let Some(uri) = uri else {
            tracing::warn!("MONGODB_URI not set, database will be reported as disconnected");
            return Self::absent();
        };

        match MongoClient::connect(uri, app_name).await {
            Ok(client) => {
                tracing::info!("MongoDB client configured");
                Self::new(ClientHandle::Present(Arc::new(client)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not create MongoDB client");
                Self::absent()
            }
        }
    }
}

impl ClientProvider for StaticProvider {
    fn client(&self) -> ClientHandle {
        self.handle.clone()
    }
}

/// MongoDB-backed [`DatabaseClient`].
///
/// The driver connects lazily, so constructing one does not touch the
/// network; reachability is only established by [`DatabaseClient::ping`].
#[derive(Clone, Debug)]
pub struct MongoClient {
    client: mongodb::Client,
}

impl MongoClient {
    /// # Client Construction
    ///
    /// Parses `uri` and builds a driver client tagged with `app_name`.
    ///
    /// ## Errors
    /// - [`DatabaseError::Connect`] when the URI cannot be parsed or the
    ///   options are rejected by the driver
    pub async fn connect(uri: &str, app_name: &str) -> Result<Self, DatabaseError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| DatabaseError::Connect(e.to_string()))?;
        options.app_name = Some(app_name.to_string());

        let client = mongodb::Client::with_options(options)
            .map_err(|e| DatabaseError::Connect(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DatabaseClient for MongoClient {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
