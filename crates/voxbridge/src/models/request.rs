use serde_json::Value;
use std::str::FromStr;

use super::params::AgentParams;
use crate::errors::{AgentError, AgentResult};
use crate::providers::factory::ProviderType;

/// A validated request to create an agent on one provider
#[derive(Debug, Clone, PartialEq)]
pub struct AgentCreationRequest {
    pub provider: ProviderType,
    pub params: AgentParams,
}

impl AgentCreationRequest {
    pub fn new(provider: ProviderType, params: AgentParams) -> Self {
        Self { provider, params }
    }

    /// Validate a raw request body
    ///
    /// Checks run in a fixed order so callers always hear about the first problem:
    /// payload, `provider`, `params`, `params.name`, then the provider name itself.
    pub fn from_slice(body: &[u8]) -> AgentResult<Self> {
        if body.is_empty() {
            return Err(AgentError::MissingPayload);
        }
        let payload: Value =
            serde_json::from_slice(body).map_err(|_| AgentError::MissingPayload)?;
        Self::from_value(payload)
    }

    pub fn from_value(payload: Value) -> AgentResult<Self> {
        if is_blank(&payload) {
            return Err(AgentError::MissingPayload);
        }

        let provider = match payload.get("provider") {
            Some(provider) if !is_blank(provider) => provider,
            _ => return Err(AgentError::MissingField("provider".to_string())),
        };

        let params = match payload.get("params") {
            Some(params) if params.is_object() => params,
            _ => return Err(AgentError::InvalidParams(None)),
        };

        match params.get("name") {
            Some(name) if !is_blank(name) => {}
            _ => return Err(AgentError::MissingField("params.name".to_string())),
        }

        let provider = provider
            .as_str()
            .and_then(|p| ProviderType::from_str(p).ok())
            .ok_or(AgentError::InvalidProvider)?;

        let params: AgentParams = serde_json::from_value(params.clone())
            .map_err(|e| AgentError::InvalidParams(Some(e.to_string())))?;

        Ok(Self::new(provider, params))
    }
}

// Null, false, zero and empty strings/arrays/objects all count as "not provided"
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
