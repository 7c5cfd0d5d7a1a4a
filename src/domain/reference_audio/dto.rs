use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of `GET /ref-audios/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefAudioListing {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub ref_texts: HashMap<String, String>,
}

/// Response of `POST /upload-ref-audio/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedRefAudio {
    pub filename: String,
}

/// Response of `DELETE /delete-ref-audio/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}
