use super::error::{RejectedFile, UploadError};
use super::model::UploadFile;
use crate::domain::shared::format_file_size;

const MB: u64 = 1024 * 1024;

/// Client-side acceptance rule for one kind of upload.
#[derive(Debug, Clone, Copy)]
pub struct FileRule {
    pub label: &'static str,
    pub extensions: &'static [&'static str],
    pub mime_types: &'static [&'static str],
    pub max_bytes: u64,
}

pub const REFERENCE_AUDIO_RULE: FileRule = FileRule {
    label: "audio",
    extensions: &[".wav", ".mp3", ".flac", ".m4a", ".ogg"],
    mime_types: &[
        "audio/wav",
        "audio/x-wav",
        "audio/wave",
        "audio/mpeg",
        "audio/mp3",
        "audio/flac",
        "audio/x-flac",
        "audio/mp4",
        "audio/x-m4a",
        "audio/m4a",
        "audio/ogg",
    ],
    max_bytes: 50 * MB,
};

pub const TRANSCRIPT_RULE: FileRule = FileRule {
    label: "text",
    extensions: &[".txt"],
    mime_types: &[],
    max_bytes: 10 * MB,
};

impl FileRule {
    /// Reason the file is refused, or `None` when it passes.
    pub fn check(&self, file: &UploadFile) -> Option<String> {
        let extension_ok = file
            .extension()
            .map(|ext| self.extensions.contains(&ext.as_str()))
            .unwrap_or(false);
        let mime_ok = file
            .mime
            .as_deref()
            .map(|mime| self.mime_types.contains(&mime))
            .unwrap_or(false);

        if !extension_ok && !mime_ok {
            return Some(format!(
                "unsupported {} file type (allowed: {})",
                self.label,
                self.extensions.join(", ")
            ));
        }

        if file.size > self.max_bytes {
            return Some(format!(
                "file is {}, maximum is {}",
                format_file_size(file.size),
                format_file_size(self.max_bytes)
            ));
        }

        None
    }
}

/// Validate a whole batch before any network call. Every rejected file is
/// reported, not just the first one.
pub fn validate_batch(files: &[UploadFile], rule: &FileRule) -> Result<(), UploadError> {
    if files.is_empty() {
        return Err(UploadError::NoFiles);
    }

    let rejected: Vec<RejectedFile> = files
        .iter()
        .filter_map(|file| {
            rule.check(file).map(|reason| RejectedFile {
                filename: file.name.clone(),
                reason,
            })
        })
        .collect();

    if rejected.is_empty() {
        Ok(())
    } else {
        tracing::warn!(
            rule = rule.label,
            rejected = rejected.len(),
            total = files.len(),
            "Upload batch failed validation"
        );
        Err(UploadError::Invalid(rejected))
    }
}
