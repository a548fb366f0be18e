use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};
use url::Url;

use super::base::Provider;
use super::configs::RetellProviderConfig;
use super::factory::ProviderType;
use super::types::{RetellAgentDetails, RetellAgentReply, RetellAgentRequest};
use super::utils::{endpoint_url, error_message_from_response, params_to_retell_spec};
use crate::errors::{AgentError, AgentResult};
use crate::models::params::AgentParams;
use crate::models::response::AgentResponse;

pub struct RetellProvider {
    client: Client,
    config: RetellProviderConfig,
    endpoint: Url,
}

impl RetellProvider {
    pub fn new(config: RetellProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = endpoint_url(&config.host, "create-agent")?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    async fn post(&self, payload: &RetellAgentRequest) -> AgentResult<RetellAgentReply> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(payload)
            .send()
            .await
            .map_err(|e| AgentError::upstream(ProviderType::Retell, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message_from_response(response).await;
            error!("Retell API returned {}: {}", status, message);
            return Err(AgentError::upstream(ProviderType::Retell, message));
        }

        // A reply missing any required agent field fails here
        response
            .json()
            .await
            .map_err(|e| AgentError::upstream(ProviderType::Retell, e.to_string()))
    }
}

#[async_trait]
impl Provider for RetellProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Retell
    }

    async fn create_agent(&self, params: &AgentParams) -> AgentResult<AgentResponse> {
        let payload = params_to_retell_spec(params);
        info!("Sending Retell API request to {}", self.endpoint);
        debug!("Retell payload: {:?}", payload);

        let reply = self.post(&payload).await?;
        debug!("Retell API response: {:?}", reply);

        let agent_id = reply.agent_id.clone();
        let name = reply
            .agent_name
            .clone()
            .unwrap_or_else(|| payload.agent_name.clone());
        let details = serde_json::to_value(RetellAgentDetails::from(reply))
            .map_err(|e| AgentError::upstream(ProviderType::Retell, e.to_string()))?;

        Ok(AgentResponse::created(agent_id, name, Some(details)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn agent_reply() -> Value {
        json!({
            "agent_id": "agent_123",
            "agent_name": "Bot1",
            "response_engine": {
                "type": "retell-llm",
                "llm_id": "llm_d16e07ac75c77c2101412f199ce5",
                "version": 0
            },
            "voice_id": "11labs-Adrian",
            "language": "en-US",
            "last_modification_timestamp": 1703413636133i64
        })
    }

    async fn _setup_mock_server(response: ResponseTemplate) -> (MockServer, RetellProvider) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/create-agent"))
            .and(header("Authorization", "Bearer test_api_key"))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        let config = RetellProviderConfig::new("test_api_key").with_host(mock_server.uri());
        let provider = RetellProvider::new(config).unwrap();
        (mock_server, provider)
    }

    #[tokio::test]
    async fn test_create_agent_basic() -> Result<()> {
        let (_server, provider) =
            _setup_mock_server(ResponseTemplate::new(201).set_body_json(agent_reply())).await;

        let response = provider.create_agent(&AgentParams::new("Bot1")).await?;

        assert_eq!(response.agent_id, "agent_123");
        assert_eq!(response.name, "Bot1");
        assert_eq!(response.status, "created");
        assert_eq!(
            response.details,
            Some(json!({
                "agent_id": "agent_123",
                "agent_name": "Bot1",
                "response_engine": {
                    "type": "retell-llm",
                    "llm_id": "llm_d16e07ac75c77c2101412f199ce5",
                    "version": 0
                },
                "voice_id": "11labs-Adrian",
                "created_at": 1703413636133i64
            }))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_agent_sends_mapped_body() -> Result<()> {
        let mock_server = MockServer::start().await;
        let mut reply = agent_reply();
        reply["voice_id"] = json!("elevenlabs-custom-X");
        reply["webhook_url"] = json!("https://example.com/hook");

        Mock::given(method("POST"))
            .and(path("/create-agent"))
            .and(body_json(json!({
                "response_engine": {
                    "type": "retell-llm",
                    "llm_id": "llm_d16e07ac75c77c2101412f199ce5"
                },
                "agent_name": "Bot1",
                "voice_id": "elevenlabs-custom-X",
                "webhook_url": "https://example.com/hook"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(reply))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = RetellProviderConfig::new("test_api_key").with_host(mock_server.uri());
        let provider = RetellProvider::new(config)?;
        let params = AgentParams::new("Bot1")
            .with_voice("elevenlabs-custom", "X")
            .with_webhook_url("https://example.com/hook");
        let response = provider.create_agent(&params).await?;

        let details = response.details.unwrap();
        assert_eq!(details["voice_id"], "elevenlabs-custom-X");
        assert_eq!(details["webhook_url"], "https://example.com/hook");

        Ok(())
    }

    #[tokio::test]
    async fn test_optional_reply_fields_absent() -> Result<()> {
        let reply = json!({
            "agent_id": "agent_456",
            "response_engine": {"type": "retell-llm"},
            "voice_id": "11labs-Adrian"
        });
        let (_server, provider) =
            _setup_mock_server(ResponseTemplate::new(201).set_body_json(reply)).await;

        let response = provider.create_agent(&AgentParams::new("Bot2")).await?;
        assert_eq!(response.name, "Bot2");

        let details = response.details.unwrap();
        assert!(details.get("webhook_url").is_none());
        assert!(details.get("created_at").is_none());
        assert_eq!(details["response_engine"]["llm_id"], Value::Null);

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_reply() -> Result<()> {
        let (_server, provider) = _setup_mock_server(
            ResponseTemplate::new(201).set_body_json(json!({"agent_name": "Bot1"})),
        )
        .await;

        let err = provider
            .create_agent(&AgentParams::new("Bot1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Upstream { provider: ProviderType::Retell, .. }));
        assert!(err.to_string().starts_with("Retell API call failed: "));

        Ok(())
    }

    #[tokio::test]
    async fn test_error_message_field() -> Result<()> {
        let (_server, provider) = _setup_mock_server(
            ResponseTemplate::new(422).set_body_json(json!({"status": "error", "message": "Invalid voice_id"})),
        )
        .await;

        let err = provider
            .create_agent(&AgentParams::new("Bot1"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Retell API call failed: Invalid voice_id");

        Ok(())
    }

    #[tokio::test]
    async fn test_unauthorized() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/create-agent"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&mock_server)
            .await;

        let config = RetellProviderConfig::new("wrong_key").with_host(mock_server.uri());
        let provider = RetellProvider::new(config)?;

        let err = provider
            .create_agent(&AgentParams::new("Bot1"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Retell API call failed: Unauthorized");

        Ok(())
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/create-agent"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(agent_reply())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let mut config = RetellProviderConfig::new("test_api_key").with_host(mock_server.uri());
        config.timeout = Duration::from_secs(1);
        let provider = RetellProvider::new(config)?;

        let err = provider
            .create_agent(&AgentParams::new("Bot1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Upstream { provider: ProviderType::Retell, .. }));

        Ok(())
    }
}
