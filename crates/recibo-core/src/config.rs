//! Configuration module
//!
//! Environment-driven configuration for storage selection, download-URL
//! lifetime, and client display behavior. Call `dotenvy::dotenv()` in the
//! binary before `Config::from_env()` if a `.env` file should be honored.

use std::env;

use crate::error::AppError;

const DEFAULT_DOWNLOAD_URL_TTL_SECS: u64 = 3600;
const DEFAULT_RECENT_UPLOADS_WINDOW_SECS: u64 = 5;

/// Which blob storage backend to construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackendKind {
    /// Filesystem-backed storage under `RECIBO_STORAGE_PATH`.
    Local,
    /// Process-local storage, for tests and throwaway runs.
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub storage_backend: StorageBackendKind,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    /// Lifetime of derived download URLs.
    pub download_url_ttl_secs: u64,
    /// How long the drop zone keeps showing freshly uploaded file names.
    pub recent_uploads_window_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let storage_backend = match env::var("RECIBO_STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => StorageBackendKind::Local,
            "memory" => StorageBackendKind::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown storage backend '{}' (expected 'local' or 'memory')",
                    other
                )))
            }
        };

        Ok(Config {
            environment: env::var("RECIBO_ENV").unwrap_or_else(|_| "development".to_string()),
            storage_backend,
            local_storage_path: env::var("RECIBO_STORAGE_PATH")
                .unwrap_or_else(|_| "./data/blobs".to_string()),
            local_storage_base_url: env::var("RECIBO_STORAGE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/files".to_string()),
            download_url_ttl_secs: parse_env_u64(
                "RECIBO_DOWNLOAD_URL_TTL_SECS",
                DEFAULT_DOWNLOAD_URL_TTL_SECS,
            )?,
            recent_uploads_window_secs: parse_env_u64(
                "RECIBO_RECENT_UPLOADS_WINDOW_SECS",
                DEFAULT_RECENT_UPLOADS_WINDOW_SECS,
            )?,
        })
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

fn parse_env_u64(key: &str, default: u64) -> Result<u64, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| AppError::Validation(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_u64_default() {
        assert_eq!(
            parse_env_u64("RECIBO_TEST_UNSET_KEY", 42).unwrap(),
            42
        );
    }

    #[test]
    fn test_is_production() {
        let mut config = Config {
            environment: "development".to_string(),
            storage_backend: StorageBackendKind::Memory,
            local_storage_path: String::new(),
            local_storage_base_url: String::new(),
            download_url_ttl_secs: 60,
            recent_uploads_window_secs: 5,
        };
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
    }
}
