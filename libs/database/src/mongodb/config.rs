use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or};

pub const DEFAULT_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_APP_NAME: &str = "mongodb-healthcheck";

/// TLS settings for the secure connection variant
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TlsSettings {
    /// CA bundle used to validate the server certificate
    pub ca_file: Option<PathBuf>,
    /// Client certificate and private key in one PEM file
    pub cert_key_file: Option<PathBuf>,
    /// Accept self-signed or otherwise invalid server certificates
    pub allow_invalid_certificates: bool,
}

/// MongoDB connection configuration for probing a single node
///
/// The base configuration is built once per invocation and never mutated.
/// [`MongoConfig::secure`] and [`MongoConfig::plain`] derive the two variants
/// that are tried in order.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017")
///     .with_credentials("clusterMonitor", "secret");
///
/// let secure = config.secure();
/// let plain = config.plain();
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct MongoConfig {
    /// MongoDB connection URL of the node to probe
    /// Format: mongodb://host[:port][/?options]
    pub url: String,

    /// Application name reported in server logs
    pub app_name: Option<String>,

    pub username: Option<String>,
    pub password: Option<String>,

    /// CA file offered to the secure variant
    pub ssl_ca_file: Option<PathBuf>,

    /// Client PEM key file offered to the secure variant
    pub ssl_pem_key_file: Option<PathBuf>,

    /// TLS settings of this variant; `None` means TLS is disabled
    pub tls: Option<TlsSettings>,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a new MongoConfig for the given URL with default timeouts
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the credentials used to authenticate
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the certificate files offered to the secure variant
    pub fn with_ssl_files(mut self, ca_file: Option<PathBuf>, pem_key_file: Option<PathBuf>) -> Self {
        self.ssl_ca_file = ca_file;
        self.ssl_pem_key_file = pem_key_file;
        self
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Set connect and server selection timeouts
    pub fn with_timeouts(mut self, connect_timeout_secs: u64, server_selection_timeout_secs: u64) -> Self {
        self.connect_timeout_secs = connect_timeout_secs;
        self.server_selection_timeout_secs = server_selection_timeout_secs;
        self
    }

    /// Secure variant: TLS on, certificate validation relaxed
    ///
    /// Against a node without TLS the handshake keeps failing until server
    /// selection gives up, so this variant waits at most the connect timeout
    /// before the plain attempt gets its turn.
    pub fn secure(&self) -> Self {
        Self {
            tls: Some(TlsSettings {
                ca_file: self.ssl_ca_file.clone(),
                cert_key_file: self.ssl_pem_key_file.clone(),
                allow_invalid_certificates: true,
            }),
            server_selection_timeout_secs: self
                .server_selection_timeout_secs
                .min(self.connect_timeout_secs),
            ..self.clone()
        }
    }

    /// Plain variant: all TLS settings cleared
    pub fn plain(&self) -> Self {
        Self {
            tls: None,
            ..self.clone()
        }
    }

    /// Whether this variant enables TLS
    pub fn is_secure(&self) -> bool {
        self.tls.is_some()
    }

    /// Get a reference to the MongoDB URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            username: None,
            password: None,
            ssl_ca_file: None,
            ssl_pem_key_file: None,
            tls: None,
            connect_timeout_secs: 5,
            server_selection_timeout_secs: 10,
        }
    }
}

impl fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConfig")
            .field("url", &self.url)
            .field("app_name", &self.app_name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("ssl_ca_file", &self.ssl_ca_file)
            .field("ssl_pem_key_file", &self.ssl_pem_key_file)
            .field("tls", &self.tls)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("server_selection_timeout_secs", &self.server_selection_timeout_secs)
            .finish()
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `MONGODB_URL` or `MONGO_URL` (optional, default: mongodb://localhost:27017)
/// - `MONGODB_CLUSTER_MONITOR_USER` (optional) - Username
/// - `MONGODB_CLUSTER_MONITOR_PASSWORD` (optional) - Password
/// - `MONGODB_NET_SSL_CA_FILE` (optional) - CA file for the secure attempt
/// - `MONGODB_NET_SSL_PEM_KEY_FILE` (optional) - Client certificate for the secure attempt
/// - `MONGODB_APP_NAME` (optional, default: mongodb-healthcheck)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 5)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 10). The
///   secure attempt is capped at the connect timeout, so a node without TLS
///   reaches the plain attempt after about `MONGODB_CONNECT_TIMEOUT_SECS`.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let url = env_optional("MONGODB_URL")
            .or_else(|| env_optional("MONGO_URL"))
            .unwrap_or(defaults.url);

        Ok(Self {
            url,
            app_name: Some(env_or_default("MONGODB_APP_NAME", DEFAULT_APP_NAME)),
            username: env_optional("MONGODB_CLUSTER_MONITOR_USER"),
            password: env_optional("MONGODB_CLUSTER_MONITOR_PASSWORD"),
            ssl_ca_file: env_optional("MONGODB_NET_SSL_CA_FILE").map(PathBuf::from),
            ssl_pem_key_file: env_optional("MONGODB_NET_SSL_PEM_KEY_FILE").map(PathBuf::from),
            tls: None,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}
