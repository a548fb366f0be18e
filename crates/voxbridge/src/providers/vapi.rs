use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use super::base::Provider;
use super::configs::VapiProviderConfig;
use super::factory::ProviderType;
use super::types::VapiAssistantRequest;
use super::utils::{endpoint_url, error_message_from_response, params_to_vapi_spec};
use crate::errors::{AgentError, AgentResult};
use crate::models::params::AgentParams;
use crate::models::response::AgentResponse;

pub struct VapiProvider {
    client: Client,
    config: VapiProviderConfig,
    endpoint: Url,
}

impl VapiProvider {
    pub fn new(config: VapiProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = endpoint_url(&config.host, "assistant")?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    async fn post(&self, payload: &VapiAssistantRequest) -> AgentResult<Value> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(payload)
            .send()
            .await
            .map_err(|e| AgentError::upstream(ProviderType::Vapi, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message_from_response(response).await;
            error!("Vapi API returned {}: {}", status, message);
            return Err(AgentError::upstream(ProviderType::Vapi, message));
        }

        response
            .json()
            .await
            .map_err(|e| AgentError::upstream(ProviderType::Vapi, e.to_string()))
    }
}

#[async_trait]
impl Provider for VapiProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Vapi
    }

    async fn create_agent(&self, params: &AgentParams) -> AgentResult<AgentResponse> {
        let payload = params_to_vapi_spec(params);
        info!("Sending Vapi API request to {}", self.endpoint);
        debug!("Vapi payload: {:?}", payload);

        let data = self.post(&payload).await?;
        debug!("Vapi API response: {}", data);

        // Numeric ids are accepted and carried as strings
        let agent_id = match data.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            None | Some(Value::Null) => {
                return Err(AgentError::upstream(
                    ProviderType::Vapi,
                    "Response is missing an assistant id",
                ))
            }
            Some(other) => {
                return Err(AgentError::upstream(
                    ProviderType::Vapi,
                    format!("Response has an invalid assistant id: {}", other),
                ))
            }
        };
        let name = data
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or(payload.name.as_str())
            .to_string();

        Ok(AgentResponse::created(agent_id, name, Some(data)))
    }
}
