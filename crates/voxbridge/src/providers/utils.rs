use anyhow::{anyhow, Result};
use reqwest::Response;
use serde_json::Value;
use url::Url;

use super::types::{
    RetellAgentRequest, RetellResponseEngine, VapiAssistantRequest, VapiModel, VapiVoice,
};
use crate::models::params::AgentParams;

pub const VAPI_DEFAULT_MODEL_PROVIDER: &str = "openai";
pub const VAPI_DEFAULT_MODEL: &str = "gpt-4";
pub const VAPI_DEFAULT_VOICE: &str = "21m00Tcm4TlvDq8ikWAM";

pub const RETELL_DEFAULT_ENGINE_TYPE: &str = "retell-llm";
pub const RETELL_DEFAULT_LLM_ID: &str = "llm_d16e07ac75c77c2101412f199ce5";
pub const RETELL_DEFAULT_VOICE: &str = "11labs-Adrian";

pub const DEFAULT_VOICE_PROVIDER: &str = "11labs";

/// Convert agent parameters to Vapi's assistant specification
pub fn params_to_vapi_spec(params: &AgentParams) -> VapiAssistantRequest {
    VapiAssistantRequest {
        name: params.name.clone(),
        model: VapiModel {
            provider: params
                .model_provider()
                .unwrap_or(VAPI_DEFAULT_MODEL_PROVIDER)
                .to_string(),
            model: params.model_name().unwrap_or(VAPI_DEFAULT_MODEL).to_string(),
        },
        voice: VapiVoice {
            provider: params
                .voice_provider()
                .unwrap_or(DEFAULT_VOICE_PROVIDER)
                .to_string(),
            voice_id: params.voice().unwrap_or(VAPI_DEFAULT_VOICE).to_string(),
        },
        webhook: params.webhook_url().map(String::from),
    }
}

/// Convert agent parameters to Retell's create-agent specification
///
/// Retell voice ids carry their provider as a prefix, except for 11labs voices which are
/// passed through untouched.
pub fn params_to_retell_spec(params: &AgentParams) -> RetellAgentRequest {
    let voice = params.voice().unwrap_or(RETELL_DEFAULT_VOICE);
    let voice_provider = params.voice_provider().unwrap_or(DEFAULT_VOICE_PROVIDER);
    let voice_id = if voice_provider == DEFAULT_VOICE_PROVIDER {
        voice.to_string()
    } else {
        format!("{}-{}", voice_provider, voice)
    };

    RetellAgentRequest {
        response_engine: RetellResponseEngine {
            engine_type: params
                .engine_type()
                .unwrap_or(RETELL_DEFAULT_ENGINE_TYPE)
                .to_string(),
            llm_id: params.llm_id().unwrap_or(RETELL_DEFAULT_LLM_ID).to_string(),
        },
        agent_name: params.name.clone(),
        voice_id,
        webhook_url: params.webhook_url().map(String::from),
    }
}

/// Resolve an endpoint against a base url, with the same rules a browser uses for links
pub fn endpoint_url(host: &str, endpoint: &str) -> Result<Url> {
    let base = Url::parse(host).map_err(|e| anyhow!("Invalid base url '{}': {}", host, e))?;
    Ok(base.join(endpoint)?)
}

/// Pull the most useful message out of a failed upstream response
///
/// Prefers a `message` field in a JSON body, then the raw body text, then the status line.
pub async fn error_message_from_response(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) => error_message_from_body(&text)
            .unwrap_or_else(|| format!("HTTP status {}", status)),
        Err(e) => e.to_string(),
    }
}

pub fn error_message_from_body(body: &str) -> Option<String> {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        match json.get("message") {
            Some(Value::String(message)) if !message.is_empty() => return Some(message.clone()),
            Some(Value::Array(messages)) if !messages.is_empty() => {
                return Some(
                    messages
                        .iter()
                        .map(|m| match m {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join("; "),
                )
            }
            _ => {}
        }
    }

    let body = body.trim();
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}
