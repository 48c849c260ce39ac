//! Object storage adapter
//!
//! Thin HTTP client over a bucket-style object store. Objects are addressed
//! as `{base}/{bucket}/{key}`; a GET 404 maps to `Ok(None)`.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::ports::ObjectStorage;
use crate::error::StorageError;

pub struct HttpObjectStorage {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    token: String,
}

impl HttpObjectStorage {
    pub fn new(base_url: String, bucket: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            bucket,
            token,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.bucket,
            key
        )
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn download(&self, key: &str) -> Result<Option<String>, StorageError> {
        let response = self
            .client
            .get(self.object_url(key))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Api { status, message });
        }

        Ok(Some(response.text().await?))
    }

    async fn upload(&self, key: &str, body: String) -> Result<(), StorageError> {
        let response = self
            .client
            .put(self.object_url(key))
            .bearer_auth(&self.token)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Api { status, message });
        }

        Ok(())
    }
}
