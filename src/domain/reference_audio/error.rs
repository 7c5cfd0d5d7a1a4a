use crate::domain::upload::UploadError;
use crate::infrastructure::audio::AudioError;
use crate::infrastructure::repositories::GatewayError;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceAudioError {
    #[error("reference audio not found: {0}")]
    NotFound(String),
    #[error("only custom reference audio can be deleted: {0}")]
    NotDeletable(String),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("failed to play reference audio: {0}")]
    Preview(#[from] AudioError),
}
