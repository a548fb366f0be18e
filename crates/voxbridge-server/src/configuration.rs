use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment, File, Map};
use serde::Deserialize;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;
use voxbridge::providers::configs::{
    ProviderConfig, RetellProviderConfig, VapiProviderConfig, RETELL_BASE_URL, VAPI_BASE_URL,
};

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Process configuration, read once at startup
///
/// Values come from `voxbridge.toml` in the working directory when present, then from
/// environment variables (`VAPI_API_KEY`, `SERVER__PORT`, ...), which take precedence.
#[derive(Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default = "default_vapi_base_url")]
    pub vapi_base_url: String,
    #[serde(default)]
    pub vapi_api_key: Option<String>,
    #[serde(default = "default_retell_base_url")]
    pub retell_base_url: String,
    #[serde(default)]
    pub retell_api_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Server defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            // Provider defaults
            .set_default("vapi_base_url", default_vapi_base_url())?
            .set_default("retell_base_url", default_retell_base_url())?
            .set_default("request_timeout_secs", default_request_timeout_secs())?
            .add_source(File::with_name("voxbridge").required(false))
            // Layer on the environment variables
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(known_env_vars())),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;

        // An empty key disables the provider just like a missing one
        settings.vapi_api_key = settings.vapi_api_key.filter(|k| !k.trim().is_empty());
        settings.retell_api_key = settings.retell_api_key.filter(|k| !k.trim().is_empty());

        for (field, value) in [
            ("vapi_base_url", &settings.vapi_base_url),
            ("retell_base_url", &settings.retell_base_url),
        ] {
            if let Err(e) = Url::parse(value) {
                return Err(ConfigError::InvalidValue {
                    env_var: to_env_var(field),
                    reason: format!("'{}' is not a valid url: {}", value, e),
                });
            }
        }

        if settings.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                env_var: to_env_var("request_timeout_secs"),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        tracing::debug!(
            vapi_configured = settings.vapi_api_key.is_some(),
            retell_configured = settings.retell_api_key.is_some(),
            "Loaded configuration"
        );

        Ok(settings)
    }

    /// Provider configurations for every provider that has a credential
    pub fn provider_configs(&self) -> Vec<ProviderConfig> {
        let timeout = Duration::from_secs(self.request_timeout_secs);
        let mut configs = Vec::new();

        if let Some(api_key) = &self.vapi_api_key {
            let mut config = VapiProviderConfig::new(api_key.clone()).with_host(&self.vapi_base_url);
            config.timeout = timeout;
            configs.push(ProviderConfig::Vapi(config));
        }
        if let Some(api_key) = &self.retell_api_key {
            let mut config =
                RetellProviderConfig::new(api_key.clone()).with_host(&self.retell_base_url);
            config.timeout = timeout;
            configs.push(ProviderConfig::Retell(config));
        }

        configs
    }
}

// Variables we read; anything else in the environment is ignored
const ENV_VARS: [&str; 7] = [
    "VAPI_BASE_URL",
    "VAPI_API_KEY",
    "RETELL_BASE_URL",
    "RETELL_API_KEY",
    "REQUEST_TIMEOUT_SECS",
    "SERVER__HOST",
    "SERVER__PORT",
];

fn known_env_vars() -> Map<String, String> {
    ENV_VARS
        .iter()
        .filter_map(|key| env::var(key).ok().map(|value| (key.to_string(), value)))
        .collect()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_vapi_base_url() -> String {
    VAPI_BASE_URL.to_string()
}

fn default_retell_base_url() -> String {
    RETELL_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use voxbridge::providers::factory::ProviderType;

    fn clean_env() {
        for key in ENV_VARS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.vapi_base_url, "https://api.vapi.ai/");
        assert_eq!(settings.retell_base_url, "https://api.retellai.com/");
        assert_eq!(settings.request_timeout_secs, 20);
        assert_eq!(settings.vapi_api_key, None);
        assert_eq!(settings.retell_api_key, None);
        assert!(settings.provider_configs().is_empty());
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("SERVER__PORT", "8080");
        env::set_var("VAPI_API_KEY", "vapi-key");
        env::set_var("VAPI_BASE_URL", "https://custom.vapi.local/");
        env::set_var("REQUEST_TIMEOUT_SECS", "5");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.vapi_api_key.as_deref(), Some("vapi-key"));
        assert_eq!(settings.vapi_base_url, "https://custom.vapi.local/");

        let configs = settings.provider_configs();
        assert_eq!(configs.len(), 1);
        if let ProviderConfig::Vapi(config) = &configs[0] {
            assert_eq!(config.host, "https://custom.vapi.local/");
            assert_eq!(config.api_key, "vapi-key");
            assert_eq!(config.timeout, Duration::from_secs(5));
        } else {
            panic!("Expected Vapi provider");
        }

        clean_env();
    }

    #[test]
    #[serial]
    fn test_both_providers() {
        clean_env();
        env::set_var("VAPI_API_KEY", "vapi-key");
        env::set_var("RETELL_API_KEY", "retell-key");

        let settings = Settings::new().unwrap();
        let types: Vec<ProviderType> = settings
            .provider_configs()
            .iter()
            .map(|c| c.provider_type())
            .collect();
        assert_eq!(types, vec![ProviderType::Vapi, ProviderType::Retell]);

        clean_env();
    }

    #[test]
    #[serial]
    fn test_unrelated_variables_ignored() {
        clean_env();
        env::set_var("SERVER", "prod");
        env::set_var("PORT", "not-a-port");
        env::set_var("VAPI_API_KEY", "vapi-key");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.vapi_api_key.as_deref(), Some("vapi-key"));

        env::remove_var("SERVER");
        env::remove_var("PORT");
        clean_env();
    }

    #[test]
    #[serial]
    fn test_empty_key_is_unset() {
        clean_env();
        env::set_var("RETELL_API_KEY", "");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.retell_api_key, None);

        clean_env();
    }

    #[test]
    #[serial]
    fn test_invalid_base_url() {
        clean_env();
        env::set_var("VAPI_BASE_URL", "api.vapi.ai");

        match Settings::new() {
            Err(ConfigError::InvalidValue { env_var, .. }) => {
                assert_eq!(env_var, "VAPI_BASE_URL");
            }
            _ => panic!("Expected invalid value error"),
        }

        clean_env();
    }

    #[test]
    #[serial]
    fn test_zero_timeout_rejected() {
        clean_env();
        env::set_var("REQUEST_TIMEOUT_SECS", "0");

        assert!(matches!(
            Settings::new(),
            Err(ConfigError::InvalidValue { .. })
        ));

        clean_env();
    }

    #[test]
    fn test_socket_addr_conversion() {
        let server_settings = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 5000,
        };
        let addr = server_settings.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:5000");
    }
}
