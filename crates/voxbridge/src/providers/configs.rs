use std::time::Duration;

use super::factory::ProviderType;

pub const VAPI_BASE_URL: &str = "https://api.vapi.ai/";
pub const RETELL_BASE_URL: &str = "https://api.retellai.com/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

// Unified enum to wrap different provider configurations
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Vapi(VapiProviderConfig),
    Retell(RetellProviderConfig),
}

impl ProviderConfig {
    pub fn provider_type(&self) -> ProviderType {
        match self {
            ProviderConfig::Vapi(_) => ProviderType::Vapi,
            ProviderConfig::Retell(_) => ProviderType::Retell,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VapiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl VapiProviderConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: VAPI_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct RetellProviderConfig {
    pub host: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl RetellProviderConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: RETELL_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }
}
