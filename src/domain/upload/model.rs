use std::path::{Path, PathBuf};

/// A local file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Content type as detected from the file header, when recognisable.
    pub mime: Option<String>,
}

impl UploadFile {
    pub fn new(path: impl Into<PathBuf>, size: u64, mime: Option<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            path,
            name,
            size,
            mime,
        }
    }

    /// Stat the file and sniff its audio signature.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;

        let mut header = [0u8; 12];
        let read = {
            use tokio::io::AsyncReadExt;
            let mut file = tokio::fs::File::open(path).await?;
            file.read(&mut header).await?
        };
        let mime = detect_audio_mime(&header[..read]).map(str::to_string);

        Ok(Self::new(path, metadata.len(), mime))
    }

    /// Lower-cased extension including the leading dot, e.g. ".wav".
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
    }
}

/// Recognise common audio containers from their magic bytes.
pub fn detect_audio_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"RIFF") && data.len() >= 12 && &data[8..12] == b"WAVE" {
        return Some("audio/wav");
    }
    if data.starts_with(b"ID3") || (data.len() >= 2 && data[0] == 0xFF && (data[1] & 0xE0) == 0xE0) {
        return Some("audio/mpeg");
    }
    if data.starts_with(b"fLaC") {
        return Some("audio/flac");
    }
    if data.starts_with(b"OggS") {
        return Some("audio/ogg");
    }
    if data.len() >= 8 && &data[4..8] == b"ftyp" {
        return Some("audio/mp4");
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUpload {
    pub filename: String,
    pub reason: String,
}

/// Outcome of one upload batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadBatchResult {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedUpload>,
}

impl UploadBatchResult {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.succeeded.is_empty() {
            parts.push(format!(
                "Uploaded {} file(s): {}",
                self.succeeded.len(),
                self.succeeded.join(", ")
            ));
        }
        if !self.failed.is_empty() {
            let failures = self
                .failed
                .iter()
                .map(|f| format!("{} ({})", f.filename, f.reason))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("Failed {} file(s): {}", self.failed.len(), failures));
        }
        parts.join(". ")
    }
}
