//! Request and reply bodies in the shapes the upstream platforms expect
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VapiModel {
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VapiVoice {
    pub provider: String,
    #[serde(rename = "voiceId")]
    pub voice_id: String,
}

/// Body of `POST /assistant`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VapiAssistantRequest {
    pub name: String,
    pub model: VapiModel,
    pub voice: VapiVoice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetellResponseEngine {
    #[serde(rename = "type")]
    pub engine_type: String,
    pub llm_id: String,
}

/// Body of `POST /create-agent`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetellAgentRequest {
    pub response_engine: RetellResponseEngine,
    pub agent_name: String,
    pub voice_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetellEngineReply {
    #[serde(rename = "type")]
    pub engine_type: String,
    #[serde(default)]
    pub llm_id: Option<String>,
    #[serde(default)]
    pub version: Option<Value>,
}

/// The fields of a created Retell agent that we carry back to callers
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RetellAgentReply {
    pub agent_id: String,
    #[serde(default)]
    pub agent_name: Option<String>,
    pub response_engine: RetellEngineReply,
    pub voice_id: String,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub last_modification_timestamp: Option<i64>,
}

/// Flattened view of a Retell agent, returned as the envelope's `details`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetellAgentDetails {
    pub agent_id: String,
    pub agent_name: Option<String>,
    pub response_engine: RetellEngineReply,
    pub voice_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl From<RetellAgentReply> for RetellAgentDetails {
    fn from(reply: RetellAgentReply) -> Self {
        Self {
            agent_id: reply.agent_id,
            agent_name: reply.agent_name,
            response_engine: reply.response_engine,
            voice_id: reply.voice_id,
            webhook_url: reply.webhook_url,
            created_at: reply.last_modification_timestamp,
        }
    }
}
