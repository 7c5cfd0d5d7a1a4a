use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to bind audio: {0}")]
    Bind(String),
}

/// A playable audio resource. Not `Clone`: the only way to give it up is
/// `AudioBackend::release`, which consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct AudioHandle {
    id: Uuid,
    location: String,
    size: usize,
}

impl AudioHandle {
    pub fn new(location: impl Into<String>, size: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            location: location.into(),
            size,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Where the player can find the audio (file path, URL, ...).
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Platform side of playback: turns bytes into a playable resource and
/// frees it again.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    async fn bind(&self, audio: &[u8]) -> Result<AudioHandle, AudioError>;

    /// Best effort; implementations log failures instead of returning them.
    async fn release(&self, handle: AudioHandle);
}

/// One player's currently bound audio. Rebinding always releases the
/// previous resource first, exactly once.
pub struct AudioSlot {
    label: &'static str,
    backend: Arc<dyn AudioBackend>,
    current: Option<AudioHandle>,
}

impl AudioSlot {
    pub fn new(label: &'static str, backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            label,
            backend,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&AudioHandle> {
        self.current.as_ref()
    }

    pub async fn replace(&mut self, audio: &[u8]) -> Result<&AudioHandle, AudioError> {
        self.clear().await;

        let handle = self.backend.bind(audio).await?;
        tracing::debug!(
            player = self.label,
            location = %handle.location(),
            size = handle.size(),
            "Audio bound"
        );

        Ok(&*self.current.insert(handle))
    }

    pub async fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            tracing::debug!(player = self.label, location = %previous.location(), "Releasing audio");
            self.backend.release(previous).await;
        }
    }
}
