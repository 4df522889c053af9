//! Publication sink: derive a storage key, upload the serialized deck, and
//! hand back a time-limited retrieval link.

use std::time::Duration;

use chrono::Utc;

use lectern_common::{DeckSpec, PublicationResult};

use crate::store::{ObjectStore, StoreError};

const KEY_SUFFIX: &str = "_presentation.pptx";
const FALLBACK_STEM: &str = "lesson_deck";

/// Deterministic key from the first slide's title, whitespace collapsed to
/// underscores. The parser guarantees non-empty titles, so the fallback stem
/// only covers a deck with no slides at all.
pub fn storage_key(deck: &DeckSpec) -> String {
    let stem = deck
        .slides
        .first()
        .map(|slide| {
            slide
                .title
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_")
        })
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    format!("{stem}{KEY_SUFFIX}")
}

/// Upload `bytes` under `key` and presign a link valid for `ttl`. Collisions
/// overwrite; failures propagate unretried.
pub async fn publish_deck(
    store: &dyn ObjectStore,
    bytes: Vec<u8>,
    key: &str,
    ttl: Duration,
) -> Result<PublicationResult, StoreError> {
    store.put(key, bytes).await?;
    let url = store.presign_get(key, ttl).await?;
    tracing::info!(key, %url, "deck published");
    Ok(PublicationResult {
        url,
        expires_at: Utc::now() + chrono::Duration::seconds(ttl.as_secs() as i64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use lectern_common::{SlideSpec, ThemeName};

    fn deck_titled(title: &str) -> DeckSpec {
        DeckSpec {
            slides: vec![SlideSpec {
                title: title.to_string(),
                body: Vec::new(),
            }],
            theme: ThemeName::Default,
        }
    }

    #[test]
    fn key_replaces_whitespace_runs() {
        assert_eq!(
            storage_key(&deck_titled("Intro to  Rust")),
            "Intro_to_Rust_presentation.pptx"
        );
    }

    #[test]
    fn key_falls_back_without_slides() {
        let empty = DeckSpec {
            slides: Vec::new(),
            theme: ThemeName::Default,
        };
        assert_eq!(storage_key(&empty), "lesson_deck_presentation.pptx");
    }

    #[tokio::test]
    async fn publish_returns_link_and_expiry() {
        let store = MemoryStore::new();
        let before = Utc::now();
        let result = publish_deck(&store, vec![0xAB], "deck_presentation.pptx", Duration::from_secs(3600))
            .await
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(result.url.contains("deck_presentation.pptx"));
        assert!(result.expires_at >= before + chrono::Duration::seconds(3600));
        assert_eq!(store.get("deck_presentation.pptx"), Some(vec![0xAB]));
    }
}
