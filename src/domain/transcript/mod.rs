pub mod service;

use serde::{Deserialize, Serialize};
pub use service::{TranscriptBatch, TranscriptUploader};

/// Response of `POST /upload-text-file/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedTranscript {
    pub filename: String,
    pub content: String,
}
