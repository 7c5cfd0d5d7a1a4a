use super::error::GatewayError;
use crate::domain::reference_audio::dto::{DeleteAck, RefAudioListing, UploadedRefAudio};
use crate::domain::synthesis::dto::{CancelAck, SynthesisRequest, SynthesizedAudio};
use crate::domain::transcript::UploadedTranscript;
use crate::domain::upload::UploadFile;
use async_trait::async_trait;

/// Synthesis endpoints of the TTS server.
///
/// Dropping the future returned by `synthesize` abandons the transfer; the
/// orchestrator relies on that for client-side cancellation.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// `POST /tts/` returns the audio body plus the generation headers.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio, GatewayError>;

    /// `POST /cancel-tts/{request_id}` asks the server to stop work.
    async fn cancel(&self, request_id: &str) -> Result<CancelAck, GatewayError>;
}

/// Reference audio storage on the TTS server.
#[async_trait]
pub trait ReferenceAudioRepository: Send + Sync {
    async fn list(&self) -> Result<RefAudioListing, GatewayError>;

    /// Raw bytes of one reference clip, for previewing.
    async fn fetch(&self, id: &str) -> Result<Vec<u8>, GatewayError>;

    /// Single-file multipart upload.
    async fn upload(&self, file: &UploadFile) -> Result<UploadedRefAudio, GatewayError>;

    async fn delete(&self, id: &str) -> Result<DeleteAck, GatewayError>;
}

#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    /// Single-file multipart upload; the server echoes back the text content.
    async fn upload_text(&self, file: &UploadFile) -> Result<UploadedTranscript, GatewayError>;
}
