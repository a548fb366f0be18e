use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STATUS_CREATED: &str = "created";

/// The envelope returned to callers, whichever provider created the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub agent_id: String,
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AgentResponse {
    /// Build a successful envelope, dropping `details` when there is nothing in it
    pub fn created<I: Into<String>, N: Into<String>>(
        agent_id: I,
        name: N,
        details: Option<Value>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            name: name.into(),
            status: STATUS_CREATED.to_string(),
            details: details.filter(has_content),
        }
    }
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(o) => !o.is_empty(),
        Value::Array(a) => !a.is_empty(),
        _ => true,
    }
}
