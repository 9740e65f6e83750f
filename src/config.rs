//! Server configuration.

use crate::error::{Result, TryOnError};
use crate::gateway::{ChatGateway, API_KEY_ENV, DEFAULT_GATEWAY_URL, DEFAULT_MODEL};
use crate::proxy::ProxyState;
use std::net::SocketAddr;
use std::sync::Arc;

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:8787";

/// Builder for ServerConfig.
///
/// Each setting resolves from the builder, then its environment variable,
/// then the default: `TRYON_BIND`, `AI_GATEWAY_URL`, `AI_GATEWAY_MODEL`, and
/// `LOVABLE_API_KEY` (no default).
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    bind: Option<String>,
    gateway_url: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
}

impl ServerConfigBuilder {
    /// Creates a builder with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the listen address.
    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.bind = Some(addr.into());
        self
    }

    /// Sets the gateway chat-completions URL.
    pub fn gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = Some(url.into());
        self
    }

    /// Sets the gateway model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the gateway API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Resolves every setting. Fails only on an unparseable bind address;
    /// a missing API key is allowed here and reported per request.
    pub fn build(self) -> Result<ServerConfig> {
        let bind = resolve(self.bind, "TRYON_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind
            .parse()
            .map_err(|e| TryOnError::Config(format!("invalid bind address {bind:?}: {e}")))?;

        Ok(ServerConfig {
            bind,
            gateway_url: resolve(self.gateway_url, "AI_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            model: resolve(self.model, "AI_GATEWAY_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: resolve(self.api_key, API_KEY_ENV),
        })
    }
}

fn resolve(explicit: Option<String>, env: &str) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var(env).ok().filter(|v| !v.is_empty()))
}

/// Resolved proxy server settings.
#[derive(Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: SocketAddr,
    /// Gateway chat-completions URL.
    pub gateway_url: String,
    /// Gateway model.
    pub model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("gateway_url", &self.gateway_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServerConfig {
    /// Creates a new `ServerConfigBuilder`.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }

    /// Returns true if an API key was resolved.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Builds the proxy state. Without an API key the proxy still starts,
    /// and requests past validation get a config fault.
    pub fn proxy_state(&self) -> ProxyState {
        let Some(key) = self.api_key.as_deref() else {
            tracing::warn!("{API_KEY_ENV} is not configured; try-on requests will fail");
            return ProxyState::unconfigured();
        };

        match ChatGateway::builder()
            .api_key(key)
            .url(&self.gateway_url)
            .model(&self.model)
            .build()
        {
            Ok(gateway) => ProxyState::new(Arc::new(gateway)),
            Err(e) => {
                tracing::warn!("gateway unavailable: {e}");
                ProxyState::unconfigured()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_settings() {
        let config = ServerConfig::builder()
            .bind("127.0.0.1:9000")
            .gateway_url("http://localhost:1/v1/chat/completions")
            .model("vendor/model")
            .api_key("secret")
            .build()
            .unwrap();

        assert_eq!(config.bind, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.gateway_url, "http://localhost:1/v1/chat/completions");
        assert_eq!(config.model, "vendor/model");
        assert!(config.has_api_key());
        assert!(config.proxy_state().is_configured());
    }

    #[test]
    fn test_invalid_bind() {
        let err = ServerConfig::builder().bind("not-an-addr").build().unwrap_err();
        assert!(matches!(err, TryOnError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ServerConfig::builder()
            .bind("127.0.0.1:9000")
            .api_key("super-secret")
            .build()
            .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
