//! Model-client seam: the trait the pipeline talks to, the OpenAI adapter
//! used in production, and a stub for tests and key-less runs.

use anyhow::Result;
use async_trait::async_trait;

use lectern_openai::OpenAiClient;

use crate::config::Config;
use crate::prompt;

#[async_trait]
pub trait ModelClient: Send + Sync {
    /// One-shot completion: full outline text back, no streaming.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Adapter wrapping the raw OpenAI client with the fixed sampling
/// parameters.
pub struct OpenAiAdapter {
    inner: OpenAiClient,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiAdapter {
    pub fn from_config(config: &Config) -> Self {
        let inner = OpenAiClient::new(config.openai_api_key.clone(), config.model.clone())
            .with_project(config.openai_project.clone())
            .with_organization(config.openai_org.clone());
        Self {
            inner,
            max_tokens: prompt::MAX_TOKENS,
            temperature: prompt::TEMPERATURE,
        }
    }
}

#[async_trait]
impl ModelClient for OpenAiAdapter {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.inner
            .chat(system, user, self.max_tokens, self.temperature)
            .await
    }
}

/// Canned outline for running the pipeline without an API key. The shape
/// matches the documented grammar, theme token included.
pub struct StubClient;

#[async_trait]
impl ModelClient for StubClient {
    async fn complete(&self, _system: &str, user: &str) -> Result<String> {
        let topic = user
            .lines()
            .skip_while(|line| *line != "Lesson Plan:")
            .nth(1)
            .unwrap_or("Lesson")
            .trim();
        Ok(format!(
            "1. Slide: {topic}\n\
Heading: {topic}\n\
Sub-point 1: What we will cover\n\
Sub-point 2: Why it matters\n\
Icon: book\n\
\n\
2. Slide: Key Ideas\n\
Heading: Key Ideas\n\
Sub-point 1: The core concept\n\
Sub-point 2: A worked example\n\
Image: a simple diagram of the main idea\n\
\n\
3. Slide: Takeaways\n\
Sub-point 1: Recap the essentials\n\
Sub-point 2: Questions to explore next\n\
\n\
This lesson works well with the light theme."
        ))
    }
}
