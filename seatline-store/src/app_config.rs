use serde::Deserialize;
use std::env;
use std::io;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address or host name to listen on
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Listen address, resolving `host` if it is a name such as `localhost`
    pub async fn resolve(&self) -> io::Result<SocketAddr> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} did not resolve to any address", self.host),
                )
            })
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "seatline_api=debug,seatline_store=info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Uncommitted local overrides
            .add_source(config::File::with_name("config/local").required(false))
            // SEATLINE__SERVER__PORT=9090 sets server.port
            .add_source(config::Environment::with_prefix("SEATLINE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_match_original_listener() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.resolve().await.unwrap().to_string(), "0.0.0.0:8080");
        assert!(!config.logging.json);
        assert_eq!(config.client.endpoint, "http://localhost:8080");
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 9090\n\n[logging]\njson = true\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: Config = s.try_deserialize().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert!(config.logging.json);
        assert_eq!(config.logging.filter, LoggingConfig::default().filter);
        assert_eq!(config.client.endpoint, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_host_name_is_resolved() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            port: 9090,
        };
        let addr = server.resolve().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 9090);
    }

    #[tokio::test]
    async fn test_invalid_host_is_reported() {
        let server = ServerConfig {
            host: "not a host".to_string(),
            port: 8080,
        };
        assert!(server.resolve().await.is_err());
    }
}
