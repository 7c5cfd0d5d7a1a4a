pub mod error;
pub mod http_tts_repository;
pub mod tts_repository;

pub use error::GatewayError;
pub use http_tts_repository::HttpTtsRepository;
pub use tts_repository::{ReferenceAudioRepository, TranscriptRepository, TtsRepository};
