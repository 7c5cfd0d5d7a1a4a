use super::UploadedTranscript;
use crate::domain::shared::FormState;
use crate::domain::upload::{
    run_sequential, validate_batch, BatchGuard, UploadBatchResult, UploadError, UploadFile,
    TRANSCRIPT_RULE,
};
use crate::infrastructure::repositories::TranscriptRepository;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptBatch {
    pub result: UploadBatchResult,
    /// File whose content now fills the reference text, if any upload succeeded.
    pub applied_from: Option<String>,
}

/// Uploads plain-text transcripts and fills the reference text field.
pub struct TranscriptUploader {
    repo: Arc<dyn TranscriptRepository>,
    form: FormState,
    guard: BatchGuard,
}

impl TranscriptUploader {
    pub fn new(repo: Arc<dyn TranscriptRepository>, form: FormState) -> Self {
        Self {
            repo,
            form,
            guard: BatchGuard::new(),
        }
    }

    /// Validate every file, upload them one by one, then replace the
    /// reference text with the content of the last file that uploaded
    /// successfully. Earlier successes are not merged in.
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<TranscriptBatch, UploadError> {
        let _permit = self.guard.try_acquire()?;
        validate_batch(&files, &TRANSCRIPT_RULE)?;

        let repo = self.repo.clone();
        let (result, uploaded) = run_sequential(files, |file| {
            let repo = repo.clone();
            async move { repo.upload_text(&file).await.map_err(|e| e.to_string()) }
        })
        .await;

        let applied_from = uploaded.into_iter().last().map(|last: UploadedTranscript| {
            tracing::info!(
                file = %last.filename,
                length = last.content.len(),
                "Reference text replaced from uploaded transcript"
            );
            self.form.update(|form| form.ref_text = last.content);
            last.filename
        });

        Ok(TranscriptBatch {
            result,
            applied_from,
        })
    }

    pub fn is_uploading(&self) -> bool {
        self.guard.is_busy()
    }
}
