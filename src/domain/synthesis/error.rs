use crate::infrastructure::audio::AudioError;
use crate::infrastructure::repositories::GatewayError;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("{0}")]
    Invalid(String),
    #[error("a synthesis request is already in progress")]
    Busy,
    #[error("no synthesis request is in progress")]
    NotGenerating,
    #[error("Received empty audio file")]
    EmptyAudio,
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("failed to play generated audio: {0}")]
    Output(#[from] AudioError),
}

impl From<GatewayError> for SynthesisError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Server { status, message } => SynthesisError::Server { status, message },
            other => SynthesisError::Transport(other.to_string()),
        }
    }
}
