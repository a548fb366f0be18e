use async_trait::async_trait;

use super::factory::ProviderType;
use crate::errors::AgentResult;
use crate::models::params::AgentParams;
use crate::models::response::AgentResponse;

/// Base trait for voice agent platforms (Vapi, Retell, etc)
#[async_trait]
pub trait Provider: Send + Sync {
    /// Which platform this provider talks to
    fn provider_type(&self) -> ProviderType;

    /// Create a new agent from provider-agnostic parameters
    ///
    /// Implementations map the parameters into their native request, make exactly one
    /// upstream call and normalize the reply. Every failure is reported as
    /// [`AgentError::Upstream`](crate::errors::AgentError::Upstream).
    async fn create_agent(&self, params: &AgentParams) -> AgentResult<AgentResponse>;
}
