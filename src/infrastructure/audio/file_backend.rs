use super::slot::{AudioBackend, AudioError, AudioHandle};
use crate::domain::upload::model::detect_audio_mime;
use async_trait::async_trait;
use chrono::Local;
use std::path::PathBuf;

/// Binds audio by writing it to a timestamped file; releasing deletes it.
pub struct FileAudioBackend {
    dir: PathBuf,
    prefix: String,
}

impl FileAudioBackend {
    pub fn new(dir: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.to_string(),
        }
    }

    fn file_name(&self, audio: &[u8]) -> String {
        let extension = match detect_audio_mime(audio) {
            Some("audio/mpeg") => "mp3",
            Some("audio/flac") => "flac",
            Some("audio/ogg") => "ogg",
            Some("audio/mp4") => "m4a",
            _ => "wav",
        };
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S-%f");
        format!("{}-{}.{}", self.prefix, timestamp, extension)
    }
}

#[async_trait]
impl AudioBackend for FileAudioBackend {
    async fn bind(&self, audio: &[u8]) -> Result<AudioHandle, AudioError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AudioError::Bind(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.dir.join(self.file_name(audio));
        tokio::fs::write(&path, audio)
            .await
            .map_err(|e| AudioError::Bind(format!("{}: {}", path.display(), e)))?;

        Ok(AudioHandle::new(path.to_string_lossy(), audio.len()))
    }

    async fn release(&self, handle: AudioHandle) {
        if let Err(e) = tokio::fs::remove_file(handle.location()).await {
            tracing::warn!(
                location = %handle.location(),
                error = %e,
                "Failed to remove released audio file"
            );
        }
    }
}
