use super::{
    base::Provider, configs::ProviderConfig, retell::RetellProvider, vapi::VapiProvider,
};
use crate::errors::{AgentError, AgentResult};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(EnumIter, EnumString, Display, AsRefStr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderType {
    Vapi,
    Retell,
}

impl ProviderType {
    /// Human readable name used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderType::Vapi => "Vapi",
            ProviderType::Retell => "Retell",
        }
    }

    /// The accepted provider names, formatted as `'vapi' or 'retell'`
    pub fn expected_names() -> String {
        ProviderType::iter()
            .map(|p| format!("'{}'", p))
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

pub fn get_provider(config: ProviderConfig) -> Result<Box<dyn Provider + Send + Sync>> {
    match config {
        ProviderConfig::Vapi(vapi_config) => Ok(Box::new(VapiProvider::new(vapi_config)?)),
        ProviderConfig::Retell(retell_config) => {
            Ok(Box::new(RetellProvider::new(retell_config)?))
        }
    }
}

/// The set of providers that have credentials, built once at startup
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderType, Arc<dyn Provider + Send + Sync>>,
}

impl ProviderRegistry {
    pub fn new<I>(configs: I) -> Result<Self>
    where
        I: IntoIterator<Item = ProviderConfig>,
    {
        let mut registry = Self::default();
        for config in configs {
            registry.insert(Arc::from(get_provider(config)?));
        }
        Ok(registry)
    }

    pub fn insert(&mut self, provider: Arc<dyn Provider + Send + Sync>) {
        self.providers.insert(provider.provider_type(), provider);
    }

    /// Look up a provider, failing with a configuration error when it has no credential
    pub fn get(&self, provider_type: ProviderType) -> AgentResult<Arc<dyn Provider + Send + Sync>> {
        self.providers
            .get(&provider_type)
            .cloned()
            .ok_or(AgentError::NotConfigured(provider_type))
    }

    /// Configured providers in declaration order
    pub fn configured(&self) -> Vec<ProviderType> {
        ProviderType::iter()
            .filter(|p| self.providers.contains_key(p))
            .collect()
    }
}
