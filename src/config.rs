use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::media::MediaConfig;

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog: CatalogSection,
    pub media: MediaSection,
    pub admin: AdminSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("SHOWROOM_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut builder = config::Config::builder();

        if Path::new(&config_path).exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(&config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SHOWROOM")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        // ADMIN_API_KEY is the conventional name used by deploy scripts.
        if config.admin.api_key.is_none() {
            if let Ok(key) = env::var("ADMIN_API_KEY") {
                config.admin.api_key = Some(key);
            }
        }

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Resolve the media storage configuration.
    pub fn media_runtime(&self) -> Result<MediaConfig> {
        self.media.to_runtime()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CatalogSection {
    /// Directory of scraped JSON files imported at startup. None = start
    /// with an empty catalog.
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaSection {
    pub backend: MediaBackendKind,
    pub local: Option<LocalMediaSection>,
    pub s3: Option<S3MediaSection>,
}

impl MediaSection {
    pub fn to_runtime(&self) -> Result<MediaConfig> {
        match self.backend {
            MediaBackendKind::Local => {
                let local = self.local.clone().unwrap_or_default();
                Ok(MediaConfig::Local {
                    root_path: local.root_path,
                })
            }
            MediaBackendKind::S3 => {
                let s3 = self
                    .s3
                    .clone()
                    .context("media.s3 configuration required when backend is 's3'")?;

                if s3.bucket.trim().is_empty() {
                    bail!("media.s3.bucket must be specified");
                }
                if s3.region.trim().is_empty() {
                    bail!("media.s3.region must be specified");
                }

                Ok(MediaConfig::S3 {
                    bucket: s3.bucket,
                    region: s3.region,
                    endpoint: s3.endpoint,
                })
            }
        }
    }
}

impl Default for MediaSection {
    fn default() -> Self {
        Self {
            backend: MediaBackendKind::Local,
            local: Some(LocalMediaSection::default()),
            s3: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaBackendKind {
    #[default]
    Local,
    S3,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalMediaSection {
    pub root_path: String,
}

impl Default for LocalMediaSection {
    fn default() -> Self {
        Self {
            root_path: "./media".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct S3MediaSection {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AdminSection {
    /// Shared secret expected in the x-api-key header of /admin requests.
    /// None disables the admin surface entirely.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}
