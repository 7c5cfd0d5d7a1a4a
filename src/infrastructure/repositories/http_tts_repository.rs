use super::error::GatewayError;
use super::tts_repository::{ReferenceAudioRepository, TranscriptRepository, TtsRepository};
use crate::domain::reference_audio::dto::{DeleteAck, RefAudioListing, UploadedRefAudio};
use crate::domain::synthesis::dto::{CancelAck, SynthesisRequest, SynthesizedAudio};
use crate::domain::transcript::UploadedTranscript;
use crate::domain::upload::UploadFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const GENERATION_TIME_HEADER: &str = "x-generation-time";
pub const SEED_USED_HEADER: &str = "x-seed-used";

/// FastAPI style error body. `detail` is a string for handled errors and a
/// list of objects for request validation failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// reqwest implementation of every TTS server endpoint.
pub struct HttpTtsRepository {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpTtsRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(base_url, http_client))
    }

    pub fn with_client(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into a `GatewayError::Server`.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .map(|detail| match detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });

        Err(GatewayError::server(status.as_u16(), detail))
    }

    async fn json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn file_part(file: &UploadFile) -> Result<Part, GatewayError> {
        let data = tokio::fs::read(&file.path)
            .await
            .map_err(|e| GatewayError::LocalFile(format!("{}: {}", file.path.display(), e)))?;

        let mime = file.mime.as_deref().unwrap_or("application/octet-stream");
        Part::bytes(data)
            .file_name(file.name.clone())
            .mime_str(mime)
            .map_err(|e| GatewayError::LocalFile(format!("Failed to set MIME type: {}", e)))
    }

    async fn post_file(&self, path: &str, file: &UploadFile) -> Result<reqwest::Response, GatewayError> {
        let form = Form::new().part("file", Self::file_part(file).await?);

        tracing::info!(url = %self.url(path), file = %file.name, size = file.size, "Uploading file");

        self.http_client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(GatewayError::from)
    }
}

/// Percent-encode each path segment of a storage key, keeping the
/// `category/name` separator.
pub fn encode_id(id: &str) -> String {
    id.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn header_value<T: std::str::FromStr>(headers: &reqwest::header::HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<T>().ok())
}

#[async_trait]
impl TtsRepository for HttpTtsRepository {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio, GatewayError> {
        tracing::info!(
            request_id = %request.request_id,
            text_length = request.text.len(),
            ref_audio = %request.ref_audio,
            seed = ?request.seed,
            "Sending TTS request"
        );

        let response = self
            .http_client
            .post(self.url("/tts/"))
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let generation_time = header_value::<f64>(response.headers(), GENERATION_TIME_HEADER);
        let seed = header_value::<u64>(response.headers(), SEED_USED_HEADER);
        let audio = response.bytes().await?.to_vec();

        tracing::info!(
            request_id = %request.request_id,
            audio_size = audio.len(),
            generation_time = ?generation_time,
            seed = ?seed,
            "TTS response received"
        );

        Ok(SynthesizedAudio {
            audio,
            generation_time,
            seed,
        })
    }

    async fn cancel(&self, request_id: &str) -> Result<CancelAck, GatewayError> {
        let path = format!("/cancel-tts/{}", urlencoding::encode(request_id));
        tracing::info!(request_id = %request_id, "Requesting server-side cancellation");

        let response = self.http_client.post(self.url(&path)).send().await?;
        Self::json(response).await
    }
}

#[async_trait]
impl ReferenceAudioRepository for HttpTtsRepository {
    async fn list(&self) -> Result<RefAudioListing, GatewayError> {
        let response = self.http_client.get(self.url("/ref-audios/")).send().await?;
        Self::json(response).await
    }

    async fn fetch(&self, id: &str) -> Result<Vec<u8>, GatewayError> {
        let path = format!("/ref-audios/{}", encode_id(id));
        let response = self.http_client.get(self.url(&path)).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn upload(&self, file: &UploadFile) -> Result<UploadedRefAudio, GatewayError> {
        let response = self.post_file("/upload-ref-audio/", file).await?;
        Self::json(response).await
    }

    async fn delete(&self, id: &str) -> Result<DeleteAck, GatewayError> {
        let path = format!("/delete-ref-audio/{}", encode_id(id));
        tracing::info!(id = %id, "Deleting reference audio");

        let response = self.http_client.delete(self.url(&path)).send().await?;
        Self::json(response).await
    }
}

#[async_trait]
impl TranscriptRepository for HttpTtsRepository {
    async fn upload_text(&self, file: &UploadFile) -> Result<UploadedTranscript, GatewayError> {
        let response = self.post_file("/upload-text-file/", file).await?;
        Self::json(response).await
    }
}
