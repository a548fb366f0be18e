use thiserror::Error;

use crate::providers::factory::ProviderType;

/// Broad classes of failure, used by the server to choose a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something we can't use
    Validation,
    /// The selected provider has no credential configured
    Configuration,
    /// Anything that went wrong while talking to the provider
    Upstream,
}

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Missing JSON payload")]
    MissingPayload,

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Missing or invalid params object{}", detail_suffix(.0))]
    InvalidParams(Option<String>),

    #[error("Invalid provider. Must be {}", ProviderType::expected_names())]
    InvalidProvider,

    #[error("{} API key not configured", .0.display_name())]
    NotConfigured(ProviderType),

    #[error("{} API call failed: {message}", .provider.display_name())]
    Upstream {
        provider: ProviderType,
        message: String,
    },
}

impl AgentError {
    pub fn upstream<S: Into<String>>(provider: ProviderType, message: S) -> Self {
        AgentError::Upstream {
            provider,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AgentError::MissingPayload
            | AgentError::MissingField(_)
            | AgentError::InvalidParams(_)
            | AgentError::InvalidProvider => ErrorKind::Validation,
            AgentError::NotConfigured(_) => ErrorKind::Configuration,
            AgentError::Upstream { .. } => ErrorKind::Upstream,
        }
    }
}

pub type AgentResult<T> = Result<T, AgentError>;

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {}", detail),
        None => String::new(),
    }
}
