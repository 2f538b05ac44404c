//! Media storage abstraction
//!
//! Brand logos and model imagery live in an external object store; the API
//! only proxies bytes out of it. Backends: local filesystem and S3-compatible
//! stores (including R2 via a custom endpoint).

use async_trait::async_trait;
use bytes::Bytes;

use crate::{Error, Result};

pub mod local;
pub mod s3;

/// Image keys are stored without extension; these are tried in order.
const EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".webp"];

/// Media backend trait
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Read object bytes, or `Ok(None)` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;
}

/// An image resolved through the extension fallback.
pub struct ResolvedImage {
    pub bytes: Bytes,
    pub content_type: &'static str,
}

/// Resolve `path` (e.g. "brands/tata" or "nexon/nexon-main") by probing the
/// known extensions in order. Misses on individual extensions are expected;
/// only exhausting all of them is a NotFound.
pub async fn resolve_image(store: &dyn MediaStore, path: &str) -> Result<ResolvedImage> {
    if path.is_empty() {
        return Err(Error::MediaNotFound("(empty path)".to_string()));
    }

    for ext in EXTENSIONS {
        let key = format!("{path}{ext}");
        if let Some(bytes) = store.get(&key).await? {
            return Ok(ResolvedImage {
                bytes,
                content_type: content_type_for(ext),
            });
        }
    }

    Err(Error::MediaNotFound(path.to_string()))
}

fn content_type_for(ext: &str) -> &'static str {
    match ext {
        ".png" => "image/png",
        ".webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// Media configuration
#[derive(Debug, Clone)]
pub enum MediaConfig {
    S3 {
        bucket: String,
        region: String,
        endpoint: Option<String>,
    },
    Local {
        root_path: String,
    },
}

/// Create media backend from config
pub async fn create_media_store(config: MediaConfig) -> Result<Box<dyn MediaStore>> {
    match config {
        MediaConfig::S3 {
            bucket,
            region,
            endpoint,
        } => {
            let backend = s3::S3Media::new(bucket, region, endpoint).await?;
            Ok(Box::new(backend))
        }
        MediaConfig::Local { root_path } => {
            let backend = local::LocalMedia::new(root_path)?;
            Ok(Box::new(backend))
        }
    }
}
