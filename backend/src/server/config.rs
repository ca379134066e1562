//! HTTP server configuration object and helpers.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;
use tracing::warn;
use uuid::Uuid;

use crate::auth::DEFAULT_TTL_DAYS;

const DEFAULT_SECRET_PATH: &str = "/var/run/secrets/token_secret";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CURRENCY: &str = "usd";

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) token_secret: Vec<u8>,
    pub(crate) token_ttl_days: i64,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) gateway_url: Option<Url>,
    pub(crate) gateway_timeout: Duration,
    pub(crate) currency: String,
}

impl ServerConfig {
    /// Construct a configuration from explicit values.
    #[must_use]
    pub fn new(token_secret: Vec<u8>, bind_addr: SocketAddr) -> Self {
        Self {
            token_secret,
            token_ttl_days: DEFAULT_TTL_DAYS,
            bind_addr,
            gateway_url: None,
            gateway_timeout: Duration::from_secs(DEFAULT_GATEWAY_TIMEOUT_SECS),
            currency: DEFAULT_CURRENCY.to_owned(),
        }
    }

    /// Override the credential lifetime.
    #[must_use]
    pub fn with_token_ttl_days(mut self, days: i64) -> Self {
        self.token_ttl_days = days;
        self
    }

    /// Route charges through an external payment gateway instead of the
    /// in-process fixture.
    #[must_use]
    pub fn with_gateway(mut self, url: Url, timeout: Duration) -> Self {
        self.gateway_url = Some(url);
        self.gateway_timeout = timeout;
        self
    }

    /// Charge in the given ISO currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Assemble a configuration from environment variables.
    ///
    /// `TOKEN_SECRET_FILE` names the signing secret; without one, an
    /// ephemeral secret is only permitted in debug builds or when
    /// `TOKEN_ALLOW_EPHEMERAL=1`. `BIND_ADDR`, `TOKEN_TTL_DAYS`,
    /// `PAYMENT_GATEWAY_URL`, `PAYMENT_TIMEOUT_SECS`, and `CURRENCY` override
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when the secret is unavailable in a release
    /// build or a variable fails to parse.
    pub fn from_env() -> std::io::Result<Self> {
        let secret_path =
            env::var("TOKEN_SECRET_FILE").unwrap_or_else(|_| DEFAULT_SECRET_PATH.into());
        let token_secret = match std::fs::read(&secret_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!(path = %secret_path, error = %e, "using ephemeral token secret (dev only)");
                    Uuid::new_v4().as_bytes().to_vec()
                } else {
                    return Err(std::io::Error::other(format!(
                        "failed to read token secret at {secret_path}: {e}"
                    )));
                }
            }
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

        let mut config = Self::new(token_secret, bind_addr);

        if let Ok(raw) = env::var("TOKEN_TTL_DAYS") {
            let days = raw
                .parse::<i64>()
                .map_err(|e| std::io::Error::other(format!("invalid TOKEN_TTL_DAYS: {e}")))?;
            config = config.with_token_ttl_days(days);
        }

        if let Ok(raw) = env::var("PAYMENT_GATEWAY_URL") {
            let url = Url::parse(&raw)
                .map_err(|e| std::io::Error::other(format!("invalid PAYMENT_GATEWAY_URL: {e}")))?;
            let timeout_secs = match env::var("PAYMENT_TIMEOUT_SECS") {
                Ok(raw) => raw.parse::<u64>().map_err(|e| {
                    std::io::Error::other(format!("invalid PAYMENT_TIMEOUT_SECS: {e}"))
                })?,
                Err(_) => DEFAULT_GATEWAY_TIMEOUT_SECS,
            };
            config = config.with_gateway(url, Duration::from_secs(timeout_secs));
        }

        if let Ok(currency) = env::var("CURRENCY") {
            config = config.with_currency(currency);
        }

        Ok(config)
    }
}
