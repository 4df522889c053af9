use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::prompt;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_LINK_TTL_SECS: u64 = 3600;

/// Startup configuration, read from the environment exactly once and passed
/// by reference from then on. Missing required values are fatal at startup,
/// never per request.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_project: Option<String>,
    pub openai_org: Option<String>,
    pub model: String,
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Host override for S3-compatible stores.
    pub endpoint: Option<String>,
    pub link_ttl: Duration,
    /// Run with the stub model client and an in-memory store; no
    /// credentials required.
    pub stub_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let stub_mode = std::env::var("LECTERN_STUB").map(|v| v == "1").unwrap_or(false);
        let model =
            std::env::var("LECTERN_MODEL").unwrap_or_else(|_| prompt::DEFAULT_MODEL.to_string());
        let link_ttl = match std::env::var("LECTERN_LINK_TTL") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .map_err(|_| anyhow!("LECTERN_LINK_TTL must be a number of seconds"))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_LINK_TTL_SECS),
        };

        if stub_mode {
            return Ok(Self {
                openai_api_key: String::new(),
                openai_project: None,
                openai_org: None,
                model,
                bucket: "lectern-stub".to_string(),
                region: DEFAULT_REGION.to_string(),
                access_key_id: String::new(),
                secret_access_key: String::new(),
                endpoint: None,
                link_ttl,
                stub_mode,
            });
        }

        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_project: optional("OPENAI_PROJECT"),
            openai_org: optional("OPENAI_ORG"),
            model,
            bucket: required("S3_BUCKET_NAME")?,
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            access_key_id: required("AWS_ACCESS_KEY_ID")?,
            secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            endpoint: optional("S3_ENDPOINT"),
            link_ttl,
            stub_mode,
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow!("{name} must be set"))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
