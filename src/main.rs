use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lectern_core::client::{ModelClient, OpenAiAdapter, StubClient};
use lectern_core::store::{MemoryStore, ObjectStore, S3Store};
use lectern_core::{Config, Generator};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    if config.stub_mode {
        tracing::info!("running in stub mode: canned outlines, in-memory store");
    }

    let model: Arc<dyn ModelClient> = if config.stub_mode {
        Arc::new(StubClient)
    } else {
        Arc::new(OpenAiAdapter::from_config(&config))
    };
    let store: Arc<dyn ObjectStore> = if config.stub_mode {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(S3Store::from_config(&config))
    };

    let (events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel();
    let generator = Arc::new(Generator::new(model, store, &config).with_events(events_tx));

    lectern_tui::run_interactive(generator, events_rx).await
}

fn init_tracing() {
    // The terminal belongs to the TUI; logs go to stderr where they can be
    // redirected.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
