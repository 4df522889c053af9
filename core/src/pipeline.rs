//! Orchestrator: validate the topic, call the model, parse, render,
//! publish. One request at a time, no retries, no partial results; the
//! first failing stage aborts the request with its specific error kind.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use lectern_common::PublicationResult;

use crate::client::ModelClient;
use crate::config::Config;
use crate::error::{GenerateError, Result};
use crate::icons::FontAwesome;
use crate::outline;
use crate::prompt;
use crate::publish;
use crate::render;
use crate::store::ObjectStore;

/// Per-request progression. `Failed` absorbs from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    Idle,
    AwaitingModel,
    Parsing,
    Rendering,
    Publishing,
    Done,
    Failed,
}

impl PipelinePhase {
    pub fn label(self) -> &'static str {
        match self {
            PipelinePhase::Idle => "idle",
            PipelinePhase::AwaitingModel => "asking the model for an outline",
            PipelinePhase::Parsing => "parsing the outline",
            PipelinePhase::Rendering => "rendering slides",
            PipelinePhase::Publishing => "uploading the deck",
            PipelinePhase::Done => "done",
            PipelinePhase::Failed => "failed",
        }
    }
}

/// Progress notifications for the interactive surface.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    Phase(PipelinePhase),
    SlidesSkipped(usize),
    Finished(Generated),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Generated {
    pub link: PublicationResult,
    pub slide_count: usize,
    pub skipped_blocks: usize,
}

pub struct Generator {
    model: Arc<dyn ModelClient>,
    store: Arc<dyn ObjectStore>,
    icons: FontAwesome,
    link_ttl: Duration,
    events: Option<UnboundedSender<PipelineEvent>>,
}

impl Generator {
    pub fn new(model: Arc<dyn ModelClient>, store: Arc<dyn ObjectStore>, config: &Config) -> Self {
        Self {
            model,
            store,
            icons: FontAwesome,
            link_ttl: config.link_ttl,
            events: None,
        }
    }

    /// Report phase transitions and outcomes over `events`.
    pub fn with_events(mut self, events: UnboundedSender<PipelineEvent>) -> Self {
        self.events = Some(events);
        self
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }

    fn phase(&self, phase: PipelinePhase) {
        self.emit(PipelineEvent::Phase(phase));
    }

    pub async fn generate(&self, topic: &str) -> Result<Generated> {
        match self.run(topic).await {
            Ok(generated) => {
                self.phase(PipelinePhase::Done);
                self.emit(PipelineEvent::Finished(generated.clone()));
                Ok(generated)
            }
            Err(err) => {
                self.phase(PipelinePhase::Failed);
                self.emit(PipelineEvent::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn run(&self, topic: &str) -> Result<Generated> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GenerateError::EmptyInput);
        }

        self.phase(PipelinePhase::AwaitingModel);
        tracing::info!(topic, "requesting outline");
        let raw = self
            .model
            .complete(prompt::SYSTEM_PROMPT, &prompt::user_prompt(topic))
            .await
            .map_err(|err| GenerateError::Model(err.to_string()))?;

        self.phase(PipelinePhase::Parsing);
        let parsed = outline::parse_outline(&raw)?;
        if parsed.skipped_blocks > 0 {
            tracing::warn!(skipped = parsed.skipped_blocks, "some outline blocks were unusable");
            self.emit(PipelineEvent::SlidesSkipped(parsed.skipped_blocks));
        }

        self.phase(PipelinePhase::Rendering);
        let deck = parsed.deck;
        let rendered = render::render_deck(&deck, &self.icons);
        let slide_count = rendered.slide_count();
        // The serialized buffer lives only until the upload finishes.
        let bytes = rendered
            .into_bytes()
            .map_err(|err| GenerateError::Render(err.to_string()))?;

        self.phase(PipelinePhase::Publishing);
        let key = publish::storage_key(&deck);
        let link = publish::publish_deck(self.store.as_ref(), bytes, &key, self.link_ttl).await?;

        tracing::info!(slides = slide_count, key = %key, "deck generated");
        Ok(Generated {
            link,
            slide_count,
            skipped_blocks: parsed.skipped_blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StubClient;
    use crate::store::{MemoryStore, StoreError};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_config() -> Config {
        Config {
            openai_api_key: String::new(),
            openai_project: None,
            openai_org: None,
            model: "gpt-4".into(),
            bucket: "test".into(),
            region: "us-east-1".into(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            endpoint: None,
            link_ttl: Duration::from_secs(3600),
            stub_mode: true,
        }
    }

    struct CountingClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ModelClient for CountingClient {
        async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("should not be called"))
        }
    }

    struct AuthFailStore;

    #[async_trait]
    impl crate::store::ObjectStore for AuthFailStore {
        async fn put(&self, _key: &str, _bytes: Vec<u8>) -> std::result::Result<(), StoreError> {
            Err(StoreError::Auth("credentials rejected".into()))
        }

        async fn presign_get(
            &self,
            _key: &str,
            _ttl: Duration,
        ) -> std::result::Result<String, StoreError> {
            Err(StoreError::Auth("credentials rejected".into()))
        }
    }

    #[tokio::test]
    async fn empty_topic_fails_before_the_model_is_invoked() {
        let client = Arc::new(CountingClient { calls: AtomicUsize::new(0) });
        let generator = Generator::new(client.clone(), Arc::new(MemoryStore::new()), &test_config());

        let err = generator.generate("   ").await.unwrap_err();
        assert!(matches!(err, GenerateError::EmptyInput));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn auth_failure_surfaces_as_storage_auth() {
        let generator = Generator::new(Arc::new(StubClient), Arc::new(AuthFailStore), &test_config());
        let err = generator.generate("Tides").await.unwrap_err();
        assert!(matches!(err, GenerateError::StorageAuth(_)));
    }

    #[tokio::test]
    async fn phases_are_reported_in_order() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let generator = Generator::new(Arc::new(StubClient), Arc::new(MemoryStore::new()), &test_config())
            .with_events(tx);
        generator.generate("Tides").await.unwrap_or_else(|e| panic!("{e}"));

        let mut phases = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let PipelineEvent::Phase(phase) = event {
                phases.push(phase);
            }
        }
        assert_eq!(
            phases,
            [
                PipelinePhase::AwaitingModel,
                PipelinePhase::Parsing,
                PipelinePhase::Rendering,
                PipelinePhase::Publishing,
                PipelinePhase::Done,
            ]
        );
    }

    #[tokio::test]
    async fn model_failure_maps_to_model_error() {
        let client = Arc::new(CountingClient { calls: AtomicUsize::new(0) });
        let generator = Generator::new(client, Arc::new(MemoryStore::new()), &test_config());
        let err = generator.generate("Tides").await.unwrap_err();
        assert!(matches!(err, GenerateError::Model(_)));
    }
}
