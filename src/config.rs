//! Configuration for the upload transport.
//!
//! All transport behaviour is controlled through [`ClientConfig`], built via
//! its [`ClientConfigBuilder`]. The detector itself has no knobs besides the
//! archive policy; everything here only matters when a resource has to be
//! uploaded to learn its format.

use crate::error::ConfigError;
use reqwest::Url;
use std::fmt;

/// Default ConvertAPI endpoint.
pub const DEFAULT_BASE_URI: &str = "https://v2.convertapi.com/";

/// Environment variable holding the API token.
pub const ENV_API_SECRET: &str = "CONVERT_API_SECRET";

/// Environment variable overriding [`DEFAULT_BASE_URI`].
pub const ENV_BASE_URI: &str = "CONVERT_API_BASE_URI";

/// Transport configuration.
///
/// # Example
/// ```rust
/// use convertapi_detect::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .api_credentials("secret-token")
///     .upload_timeout_secs(120)
///     .build()
///     .unwrap();
/// assert_eq!(config.base_uri, "https://v2.convertapi.com/");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Service root. Always ends with `/` after [`ClientConfigBuilder::build`].
    pub base_uri: String,

    /// API token sent as `Authorization: Bearer …`. Default: None.
    pub api_credentials: Option<String>,

    /// TCP connect timeout in seconds. Default: 5.
    pub connect_timeout_secs: u64,

    /// Whole-request timeout for uploads in seconds. Default: 600.
    ///
    /// Uploads carry the full document body, so this is much longer than the
    /// connect timeout.
    pub upload_timeout_secs: u64,

    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            api_credentials: None,
            connect_timeout_secs: 5,
            upload_timeout_secs: 600,
            user_agent: format!("convertapi-detect/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_uri", &self.base_uri)
            .field(
                "api_credentials",
                &self.api_credentials.as_ref().map(|_| "<redacted>"),
            )
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("upload_timeout_secs", &self.upload_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Build a config from `CONVERT_API_SECRET` and `CONVERT_API_BASE_URI`.
    ///
    /// Unset or empty variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut builder = Self::builder();
        if let Some(secret) = var(ENV_API_SECRET) {
            builder = builder.api_credentials(secret);
        }
        if let Some(uri) = var(ENV_BASE_URI) {
            builder = builder.base_uri(uri);
        }
        builder.build()
    }

    /// `base_uri` joined with `path`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        parse_base_uri(&self.base_uri)?
            .join(path)
            .map_err(|e| ConfigError::InvalidBaseUri {
                uri: self.base_uri.clone(),
                reason: e.to_string(),
            })
    }
}

fn parse_base_uri(uri: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUri {
        uri: uri.to_string(),
        reason,
    };
    let url = Url::parse(uri).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.base_uri = uri.into();
        self
    }

    pub fn api_credentials(mut self, secret: impl Into<String>) -> Self {
        self.config.api_credentials = Some(secret.into());
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = secs;
        self
    }

    pub fn upload_timeout_secs(mut self, secs: u64) -> Self {
        self.config.upload_timeout_secs = secs;
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(mut self) -> Result<ClientConfig, ConfigError> {
        let c = &mut self.config;
        if !c.base_uri.ends_with('/') {
            c.base_uri.push('/');
        }
        parse_base_uri(&c.base_uri)?;
        if c.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "connect timeout must be ≥ 1s".into(),
            ));
        }
        if c.upload_timeout_secs == 0 {
            return Err(ConfigError::Invalid("upload timeout must be ≥ 1s".into()));
        }
        Ok(self.config)
    }
}
