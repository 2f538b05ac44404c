//! S3-compatible media backend

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client;
use bytes::Bytes;

use crate::{Error, Result};

use super::MediaStore;

/// S3 media store. A custom endpoint makes this work against R2 and other
/// S3-compatible object stores.
pub struct S3Media {
    client: Client,
    bucket: String,
}

impl S3Media {
    pub async fn new(bucket: String, region: String, endpoint: Option<String>) -> Result<Self> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .load()
            .await;

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&config);

        if let Some(endpoint_url) = endpoint {
            s3_config_builder = s3_config_builder
                .endpoint_url(endpoint_url)
                .force_path_style(true);
        }

        let s3_config = s3_config_builder.build();
        let client = Client::from_conf(s3_config);

        Ok(Self { client, bucket })
    }
}

#[async_trait]
impl MediaStore for S3Media {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                // A missing key is an expected miss during extension probing.
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    return Ok(None);
                }
                return Err(Error::storage(format!("S3 get failed: {service_err}")));
            }
        };

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::storage(format!("S3 body read failed: {e}")))?;

        Ok(Some(data.into_bytes()))
    }
}
