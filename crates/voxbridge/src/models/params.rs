use serde::{Deserialize, Serialize};

/// Model selection as sent by callers
///
/// Vapi reads `provider`/`model`, Retell reads `type`/`llm_id`. Callers only need to fill
/// in the pair that matches the provider they target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, rename = "type")]
    pub engine_type: Option<String>,
    #[serde(default)]
    pub llm_id: Option<String>,
}

/// Provider-agnostic parameters for a new voice agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentParams {
    pub name: String,
    #[serde(default)]
    pub model: Option<ModelParams>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub voice_provider: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
}

impl AgentParams {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: ModelParams) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_voice<P: Into<String>, V: Into<String>>(
        mut self,
        voice_provider: P,
        voice: V,
    ) -> Self {
        self.voice_provider = Some(voice_provider.into());
        self.voice = Some(voice.into());
        self
    }

    pub fn with_webhook_url<S: Into<String>>(mut self, webhook_url: S) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }

    pub fn voice(&self) -> Option<&str> {
        non_empty(&self.voice)
    }

    pub fn voice_provider(&self) -> Option<&str> {
        non_empty(&self.voice_provider)
    }

    pub fn webhook_url(&self) -> Option<&str> {
        non_empty(&self.webhook_url)
    }

    pub fn model_provider(&self) -> Option<&str> {
        self.model.as_ref().and_then(|m| non_empty(&m.provider))
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_ref().and_then(|m| non_empty(&m.model))
    }

    pub fn engine_type(&self) -> Option<&str> {
        self.model.as_ref().and_then(|m| non_empty(&m.engine_type))
    }

    pub fn llm_id(&self) -> Option<&str> {
        self.model.as_ref().and_then(|m| non_empty(&m.llm_id))
    }
}

// Empty strings behave like missing values so they fall through to defaults
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
