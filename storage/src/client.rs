use chrono::Utc;
use std::time::Duration;
use thiserror::Error;

use crate::sign::{self, Credentials};

const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

#[derive(Debug, Error)]
pub enum S3Error {
    #[error("storage credentials rejected (http {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("storage transfer failed: {0}")]
    Transfer(String),
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Host override for S3-compatible stores; defaults to the AWS
    /// regional endpoint.
    pub endpoint: Option<String>,
}

pub struct S3Client {
    http: reqwest::Client,
    config: S3Config,
}

impl S3Client {
    pub fn new(config: S3Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn credentials(&self) -> Credentials<'_> {
        Credentials {
            access_key_id: &self.config.access_key_id,
            secret_access_key: &self.config.secret_access_key,
            region: &self.config.region,
        }
    }

    fn host(&self) -> String {
        self.config
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("s3.{}.amazonaws.com", self.config.region))
    }

    /// Path-style addressing, bucket and key percent-encoded.
    fn object_path(&self, key: &str) -> String {
        format!(
            "/{}/{}",
            sign::uri_encode(&self.config.bucket, true),
            sign::uri_encode(key, true)
        )
    }

    /// Upload under `key`, overwriting any existing object.
    pub async fn put_object(&self, key: &str, bytes: Vec<u8>) -> Result<(), S3Error> {
        let host = self.host();
        let path = self.object_path(key);
        let sig = sign::sign_put(&self.credentials(), &host, &path, &bytes, Utc::now());

        tracing::debug!(key, size = bytes.len(), "uploading object");
        let resp = self
            .http
            .put(format!("https://{host}{path}"))
            .header("x-amz-date", &sig.amz_date)
            .header("x-amz-content-sha256", &sig.payload_hash)
            .header("authorization", &sig.authorization)
            .header("content-type", PPTX_CONTENT_TYPE)
            .body(bytes)
            .send()
            .await
            .map_err(|e| S3Error::Transfer(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let message = resp.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            Err(S3Error::Auth {
                status: status.as_u16(),
                message,
            })
        } else {
            Err(S3Error::Transfer(format!("http {status}: {message}")))
        }
    }

    /// Time-limited retrieval link for `key`. No request is made.
    pub fn presigned_get_url(&self, key: &str, ttl: Duration) -> String {
        sign::presign_get(
            &self.credentials(),
            &self.host(),
            &self.object_path(key),
            ttl.as_secs(),
            Utc::now(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: Option<&str>) -> S3Client {
        S3Client::new(S3Config {
            bucket: "lesson-decks".into(),
            region: "eu-west-1".into(),
            access_key_id: "AKIDEXAMPLE".into(),
            secret_access_key: "secret".into(),
            endpoint: endpoint.map(str::to_string),
        })
    }

    #[test]
    fn default_host_is_regional() {
        assert_eq!(client(None).host(), "s3.eu-west-1.amazonaws.com");
        assert_eq!(client(Some("minio.local:9000")).host(), "minio.local:9000");
    }

    #[test]
    fn object_path_is_bucket_then_encoded_key() {
        assert_eq!(
            client(None).object_path("Intro to Rust_presentation.pptx"),
            "/lesson-decks/Intro%20to%20Rust_presentation.pptx"
        );
    }

    #[test]
    fn presigned_url_points_at_the_object() {
        let url = client(None).presigned_get_url("deck.pptx", Duration::from_secs(60));
        assert!(url.starts_with("https://s3.eu-west-1.amazonaws.com/lesson-decks/deck.pptx?"));
        assert!(url.contains("X-Amz-Expires=60"));
    }
}
