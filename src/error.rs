use crate::domain::reference_audio::ReferenceAudioError;
use crate::domain::synthesis::SynthesisError;
use crate::domain::upload::UploadError;
use crate::infrastructure::repositories::GatewayError;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    ReferenceAudio(#[from] ReferenceAudioError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("TTS server error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code for this error: 2 for problems with the user's
    /// input, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BadRequest(_)
            | Self::Upload(_)
            | Self::Synthesis(SynthesisError::Invalid(_))
            | Self::ReferenceAudio(
                ReferenceAudioError::NotFound(_)
                | ReferenceAudioError::NotDeletable(_)
                | ReferenceAudioError::Upload(_),
            ) => 2,
            _ => 1,
        }
    }

    /// Log the error and return its exit code.
    pub fn report(&self) -> i32 {
        let code = self.exit_code();
        tracing::error!(error = %self, exit_code = code, "Command failed");
        code
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
