//! Port for the identity collaborator supplying audit attribution.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// No acting user could be resolved for this request.
        Unresolved { message: String } =>
            "acting user could not be resolved: {message}",
    }
}

/// The acting user recorded on generated documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorIdentity {
    /// Display name written into the audit trail.
    pub display_name: String,
}

/// Port resolving the acting user. The engine never authenticates; it
/// only attributes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the acting user for the current request.
    async fn current_actor(&self) -> Result<ActorIdentity, IdentityProviderError>;
}

/// Fixture identity for tests and unattended runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn current_actor(&self) -> Result<ActorIdentity, IdentityProviderError> {
        Ok(ActorIdentity {
            display_name: "service compte".to_owned(),
        })
    }
}
