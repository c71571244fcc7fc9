//! Voice catalog cache.
//!
//! The catalog rarely changes but the listing call is a network round trip,
//! so callers keep an explicit cache object with a TTL and a manual refresh
//! path instead of a process-wide global.

use crate::{SpeechSynthesizer, Voice};
use std::time::{Duration, Instant};
use storyforge_error::StoryforgeResult;

const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// TTL cache over a TTS backend's voice listing.
///
/// # Example
///
/// ```rust,ignore
/// let mut catalog = VoiceCatalog::new(Duration::from_secs(3600));
/// let voices = catalog.get(&tts_client).await?;
/// catalog.invalidate(); // force a refetch on next get
/// ```
pub struct VoiceCatalog {
    ttl: Duration,
    cached: Option<CachedVoices>,
}

struct CachedVoices {
    voices: Vec<Voice>,
    fetched_at: Instant,
}

impl CachedVoices {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() > ttl
    }
}

impl VoiceCatalog {
    /// Create a catalog cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, cached: None }
    }

    /// Get the voice listing, fetching from the backend when the cache is
    /// cold or expired.
    #[tracing::instrument(skip(self, synthesizer), fields(ttl = ?self.ttl))]
    pub async fn get<S: SpeechSynthesizer + ?Sized>(
        &mut self,
        synthesizer: &S,
    ) -> StoryforgeResult<Vec<Voice>> {
        if let Some(cached) = &self.cached
            && !cached.is_expired(self.ttl)
        {
            tracing::debug!(count = cached.voices.len(), "Voice catalog cache hit");
            return Ok(cached.voices.clone());
        }

        self.refresh(synthesizer).await
    }

    /// Fetch the listing from the backend unconditionally and repopulate the
    /// cache.
    #[tracing::instrument(skip(self, synthesizer))]
    pub async fn refresh<S: SpeechSynthesizer + ?Sized>(
        &mut self,
        synthesizer: &S,
    ) -> StoryforgeResult<Vec<Voice>> {
        let voices = synthesizer.list_voices().await?;
        tracing::info!(count = voices.len(), "Refreshed voice catalog");

        self.cached = Some(CachedVoices {
            voices: voices.clone(),
            fetched_at: Instant::now(),
        });
        Ok(voices)
    }

    /// Drop the cached listing; the next `get` refetches.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// True when a non-expired listing is cached.
    pub fn is_fresh(&self) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|c| !c.is_expired(self.ttl))
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storyforge_core::VoiceSettings;

    struct CountingSynthesizer {
        calls: AtomicUsize,
    }

    impl CountingSynthesizer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for CountingSynthesizer {
        async fn synthesize(
            &self,
            _text: &str,
            _voice: &VoiceSettings,
        ) -> StoryforgeResult<Vec<u8>> {
            unreachable!("catalog never synthesizes")
        }

        async fn list_voices(&self) -> StoryforgeResult<Vec<Voice>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Voice {
                id: "en-US-AriaNeural".into(),
                name: "Aria".into(),
                language: "en".into(),
                gender: "Female".into(),
                locale: "en-US".into(),
            }])
        }
    }

    #[tokio::test]
    async fn second_get_hits_cache() {
        let synth = CountingSynthesizer::new();
        let mut catalog = VoiceCatalog::new(Duration::from_secs(3600));

        let first = catalog.get(&synth).await.unwrap();
        let second = catalog.get(&synth).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(synth.calls.load(Ordering::SeqCst), 1);
        assert!(catalog.is_fresh());
    }

    #[tokio::test]
    async fn zero_ttl_always_refetches() {
        let synth = CountingSynthesizer::new();
        let mut catalog = VoiceCatalog::new(Duration::ZERO);

        catalog.get(&synth).await.unwrap();
        // A zero TTL expires immediately.
        tokio::time::sleep(Duration::from_millis(5)).await;
        catalog.get(&synth).await.unwrap();

        assert_eq!(synth.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let synth = CountingSynthesizer::new();
        let mut catalog = VoiceCatalog::new(Duration::from_secs(3600));

        catalog.get(&synth).await.unwrap();
        catalog.invalidate();
        assert!(!catalog.is_fresh());
        catalog.get(&synth).await.unwrap();

        assert_eq!(synth.calls.load(Ordering::SeqCst), 2);
    }
}
