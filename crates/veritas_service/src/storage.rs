use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::{config::Region, primitives::ByteStream, Client};

use veritas_core::backend::ObjectStorage;
use veritas_core::error::{Error, Result};

use crate::config::Config;

/// S3-compatible object storage (MinIO in development, any path-style
/// endpoint in production).
pub struct S3Storage {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3Storage {
    pub async fn connect(config: &Config) -> Self {
        let region_provider = RegionProviderChain::default_provider()
            .or_else(Region::new(config.s3_region.clone()));
        let aws_config = aws_config::from_env().region(region_provider).load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
            .force_path_style(true)
            .endpoint_url(&config.s3_endpoint)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.s3_bucket.clone(),
            public_base: config.s3_public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Self-healing: make sure the bucket exists before the first upload.
    async fn ensure_bucket(&self) -> Result<()> {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            return Ok(());
        }

        match self.client.create_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(()),
            Err(create_err) => {
                // The bucket may have appeared concurrently; re-check before
                // giving up.
                if self
                    .client
                    .head_bucket()
                    .bucket(&self.bucket)
                    .send()
                    .await
                    .is_ok()
                {
                    Ok(())
                } else {
                    Err(Error::Storage(create_err.to_string()))
                }
            }
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.ensure_bucket().await?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_base, self.bucket, key)
    }
}
