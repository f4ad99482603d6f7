use mongodb::{
    Client,
    bson::doc,
    options::{ClientOptions, Credential, Tls, TlsOptions},
};
use std::time::Duration;
use tracing::{debug, info};

use super::MongoConfig;

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Build driver options for one connection variant
///
/// The connection always targets the addressed node directly so that the
/// probe reports on this node and never on whichever member the driver would
/// otherwise select. TLS is set explicitly in both directions: a `tls=true`
/// left in the URL never leaks into the plain variant.
pub async fn client_options(config: &MongoConfig) -> Result<ClientOptions, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.direct_connection = Some(true);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    if let Some(ref username) = config.username {
        let mut credential = Credential::default();
        credential.username = Some(username.clone());
        credential.password = config.password.clone();
        options.credential = Some(credential);
    }

    options.tls = Some(match config.tls {
        Some(ref settings) => {
            let mut tls = TlsOptions::default();
            tls.allow_invalid_certificates = Some(settings.allow_invalid_certificates);
            tls.ca_file_path = settings.ca_file.clone();
            tls.cert_key_file_path = settings.cert_key_file.clone();
            Tls::Enabled(tls)
        }
        None => Tls::Disabled,
    });

    Ok(options)
}

/// Connect using a MongoConfig variant and verify the session
///
/// The driver connects lazily, so a `ping` against `admin` is issued before
/// the client is handed out. A client whose ping fails is shut down here.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::new("mongodb://localhost:27017");
/// let client = connect_from_config(&config.secure()).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!(
        url = %config.url,
        tls = config.is_secure(),
        "Attempting to connect to MongoDB"
    );

    let options = client_options(config).await?;
    let client = Client::with_options(options)?;

    if let Err(e) = client.database("admin").run_command(doc! { "ping": 1 }).await {
        client.shutdown().await;
        return Err(MongoError::ConnectionFailed(e.to_string()));
    }

    debug!(tls = config.is_secure(), "MongoDB session established");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_client_options_plain_disables_tls() {
        let config = MongoConfig::new("mongodb://localhost:27017/?tls=true").plain();
        let options = client_options(&config).await.unwrap();

        assert!(matches!(options.tls, Some(Tls::Disabled)));
        assert_eq!(options.direct_connection, Some(true));
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(5)));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(10)));
        assert!(options.credential.is_none());
    }

    #[tokio::test]
    async fn test_client_options_secure_allows_invalid_certificates() {
        let config = MongoConfig::new("mongodb://localhost:27017")
            .with_ssl_files(Some(PathBuf::from("/etc/mongodb-ssl/ca.crt")), None)
            .secure();
        let options = client_options(&config).await.unwrap();

        match options.tls {
            Some(Tls::Enabled(tls)) => {
                assert_eq!(tls.allow_invalid_certificates, Some(true));
                assert_eq!(tls.ca_file_path, Some(PathBuf::from("/etc/mongodb-ssl/ca.crt")));
                assert!(tls.cert_key_file_path.is_none());
            }
            other => panic!("expected TLS to be enabled, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_client_options_credentials() {
        let config = MongoConfig::new("mongodb://localhost:27017")
            .with_credentials("clusterMonitor", "secret")
            .with_app_name("probe");
        let options = client_options(&config).await.unwrap();

        let credential = options.credential.unwrap();
        assert_eq!(credential.username.as_deref(), Some("clusterMonitor"));
        assert_eq!(credential.password.as_deref(), Some("secret"));
        assert_eq!(options.app_name.as_deref(), Some("probe"));
    }

    #[tokio::test]
    async fn test_client_options_rejects_invalid_url() {
        let config = MongoConfig::new("not-a-mongodb-url");
        assert!(client_options(&config).await.is_err());
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_plain() {
        let mongo_url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let client = connect_from_config(&MongoConfig::new(mongo_url).plain()).await;
        assert!(client.is_ok());
        client.unwrap().shutdown().await;
    }
}
