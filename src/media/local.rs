//! Local filesystem media backend

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

use super::MediaStore;

/// Local filesystem media store
pub struct LocalMedia {
    root_path: PathBuf,
}

impl LocalMedia {
    pub fn new(root_path: impl Into<PathBuf>) -> Result<Self> {
        let root_path = root_path.into();
        std::fs::create_dir_all(&root_path)?;
        Ok(Self { root_path })
    }

    /// Keys come straight from request paths; reject traversal components.
    fn resolve_path(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
        {
            return Err(Error::InvalidRequest(format!("invalid media key: {key}")));
        }
        Ok(self.root_path.join(relative))
    }
}

#[async_trait]
impl MediaStore for LocalMedia {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let path = self.resolve_path(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
