use crate::domain::shared::SynthesisForm;
use serde::{Deserialize, Serialize};

/// Body of `POST /tts/`. Built once per submission and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    #[serde(rename = "gen_text")]
    pub text: String,
    pub speed: f32,
    pub nfe_step: u32,
    pub cross_fade_duration: f32,
    pub remove_silence: bool,
    /// `null` lets the server pick a random seed.
    pub seed: Option<u64>,
    pub ref_audio: String,
    pub ref_text: String,
    pub request_id: String,
}

impl SynthesisRequest {
    pub fn from_form(form: &SynthesisForm, request_id: String) -> Self {
        Self {
            text: form.text.trim().to_string(),
            speed: form.speed,
            nfe_step: form.nfe_step,
            cross_fade_duration: form.cross_fade_duration,
            remove_silence: form.remove_silence,
            seed: form.seed,
            ref_audio: form.ref_audio.clone(),
            ref_text: form.ref_text.clone(),
            request_id,
        }
    }
}

/// Successful `POST /tts/` response.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub audio: Vec<u8>,
    /// Seconds spent generating, from the `X-Generation-Time` header.
    pub generation_time: Option<f64>,
    /// Seed the server actually used, from the `X-Seed-Used` header.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelStatus {
    Cancelled,
    AlreadyCompleted,
    #[serde(other)]
    Unknown,
}

/// Response of `POST /cancel-tts/{request_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelAck {
    pub status: CancelStatus,
    #[serde(default)]
    pub message: String,
}
