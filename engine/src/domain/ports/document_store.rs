//! Port for the binary artifact storage collaborator.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum DocumentStoreError {
        /// The storage backend is unreachable or timing out.
        Unavailable { message: String } =>
            "document store unavailable: {message}",
        /// The write or delete was rejected.
        Rejected { message: String } =>
            "document store rejected the operation: {message}",
    }
}

/// Port persisting rendered binaries and compensating failed commits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a binary under `path`, returning its public locator.
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, DocumentStoreError>;

    /// Delete a stored artifact. Used as the compensating action when a
    /// commit fails after the artifact was written.
    async fn delete(&self, locator: &str) -> Result<(), DocumentStoreError>;
}

/// Fixture store echoing the path back as the locator.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDocumentStore;

#[async_trait]
impl DocumentStore for FixtureDocumentStore {
    async fn put(
        &self,
        path: &str,
        _bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, DocumentStoreError> {
        Ok(format!("memory://{path}"))
    }

    async fn delete(&self, _locator: &str) -> Result<(), DocumentStoreError> {
        Ok(())
    }
}
