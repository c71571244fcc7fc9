//! Shared mocks for pipeline tests.

// Each test binary uses a subset of these mocks.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use storyforge_backends::{ImageSynthesizer, SpeechSynthesizer, Voice};
use storyforge_core::{Resolution, Scene, SceneBuilder, VoiceSettings};
use storyforge_error::{BackendError, BackendErrorKind, RenderError, RenderErrorKind};
use storyforge_error::StoryforgeResult;
use storyforge_render::{ClipRenderer, Concatenator};
use storyforge_storage::{MediaCategory, MediaReference, MediaStorage};
use uuid::Uuid;

pub fn scene(order: u32) -> Scene {
    SceneBuilder::default()
        .order(order)
        .narration_text(format!("Narration {order}"))
        .visual_prompt(format!("prompt {order}"))
        .build()
        .unwrap()
}

/// In-memory storage backend.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<Uuid, Vec<u8>>>,
}

#[async_trait]
impl MediaStorage for MemoryStorage {
    async fn store(
        &self,
        data: &[u8],
        extension: &str,
        category: MediaCategory,
    ) -> StoryforgeResult<MediaReference> {
        let id = Uuid::new_v4();
        self.blobs.lock().unwrap().insert(id, data.to_vec());
        Ok(MediaReference {
            id,
            content_hash: "test-hash".into(),
            storage_backend: "memory".into(),
            storage_path: format!("/memory/{id}.{extension}"),
            size_bytes: data.len() as i64,
            category,
        })
    }

    async fn retrieve(&self, reference: &MediaReference) -> StoryforgeResult<Vec<u8>> {
        Ok(self
            .blobs
            .lock()
            .unwrap()
            .get(&reference.id)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete(&self, reference: &MediaReference) -> StoryforgeResult<()> {
        self.blobs.lock().unwrap().remove(&reference.id);
        Ok(())
    }

    async fn exists(&self, reference: &MediaReference) -> StoryforgeResult<bool> {
        Ok(self.blobs.lock().unwrap().contains_key(&reference.id))
    }
}

/// Image backend that records prompts and fails on demand.
#[derive(Default)]
pub struct MockImageSynthesizer {
    pub prompts: Mutex<Vec<(String, Resolution)>>,
    pub fail_substrings: Vec<String>,
}

#[async_trait]
impl ImageSynthesizer for MockImageSynthesizer {
    async fn synthesize(&self, prompt: &str, resolution: Resolution) -> StoryforgeResult<Vec<u8>> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), resolution));
        if self.fail_substrings.iter().any(|s| prompt.contains(s)) {
            return Err(BackendError::new(BackendErrorKind::ApiError {
                status: 500,
                message: "synthetic failure".into(),
            })
            .into());
        }
        Ok(b"image-bytes".to_vec())
    }
}

/// TTS backend that records synthesis calls.
#[derive(Default)]
pub struct MockSpeechSynthesizer {
    pub calls: Mutex<Vec<(String, VoiceSettings)>>,
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> StoryforgeResult<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice.clone()));
        Ok(b"audio-bytes".to_vec())
    }

    async fn list_voices(&self) -> StoryforgeResult<Vec<Voice>> {
        Ok(Vec::new())
    }
}

/// Clip renderer that writes a marker file and fails for chosen scenes.
#[derive(Default)]
pub struct MockRenderer {
    pub rendered: Mutex<Vec<PathBuf>>,
    pub fail_orders: Vec<u32>,
}

#[async_trait]
impl ClipRenderer for MockRenderer {
    async fn render(
        &self,
        _image_path: &Path,
        _audio_path: &Path,
        _duration_secs: f64,
        _resolution: Resolution,
        out_path: &Path,
    ) -> StoryforgeResult<()> {
        let name = out_path.file_name().unwrap().to_string_lossy().to_string();
        if self
            .fail_orders
            .iter()
            .any(|order| name == format!("scene_{order}.mp4"))
        {
            return Err(
                RenderError::new(RenderErrorKind::ProcessFailed("synthetic".into())).into(),
            );
        }
        tokio::fs::write(out_path, b"clip-bytes").await.unwrap();
        self.rendered.lock().unwrap().push(out_path.to_path_buf());
        Ok(())
    }
}

/// Concatenator that records the clip lists it receives.
#[derive(Default)]
pub struct MockConcatenator {
    pub calls: Mutex<Vec<Vec<PathBuf>>>,
}

#[async_trait]
impl Concatenator for MockConcatenator {
    async fn concatenate(&self, clips: &[PathBuf], out_path: &Path) -> StoryforgeResult<()> {
        self.calls.lock().unwrap().push(clips.to_vec());
        tokio::fs::write(out_path, b"final-bytes").await.unwrap();
        Ok(())
    }
}
