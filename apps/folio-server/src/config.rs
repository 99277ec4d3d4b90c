//! Configuration management for the Folio mock server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the catalog and the PDF files live on disk
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// JSON file holding the document list
    pub catalog_path: PathBuf,
    /// Directory the `/pdfs/{filename}` route serves from
    pub pdf_dir: PathBuf,
}

const DEFAULT_PORT: u16 = 3001;

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
            },
            data: DataConfig {
                catalog_path: PathBuf::from("./data/documents.json"),
                pdf_dir: PathBuf::from("./data/pdfs"),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            data: DataConfig {
                catalog_path: env::var("FOLIO_CATALOG_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./data/documents.json")),
                pdf_dir: env::var("FOLIO_PDF_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./data/pdfs")),
            },
        })
    }

    /// Socket address string the listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SERVER_PORT is not a valid port: {0}")]
    InvalidPort(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.bind_addr(), "0.0.0.0:3001");
        assert_eq!(config.data.pdf_dir, PathBuf::from("./data/pdfs"));
    }
}
