use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    controllers::load_files,
    domain::{shared::FormState, transcript::{TranscriptBatch, TranscriptUploader}},
    error::AppResult,
};

pub struct TranscriptController {
    uploader: Arc<TranscriptUploader>,
    form: FormState,
}

impl TranscriptController {
    pub fn new(uploader: Arc<TranscriptUploader>, form: FormState) -> Self {
        Self { uploader, form }
    }

    /// `transcript upload <files>...`
    pub async fn upload(&self, paths: &[PathBuf]) -> AppResult<TranscriptBatch> {
        let files = load_files(paths).await?;
        let batch = self.uploader.upload(files).await?;

        if batch.result.is_complete_success() {
            println!("{}", batch.result.summary());
        } else {
            eprintln!("{}", batch.result.summary());
        }
        if let Some(name) = batch.applied_from.as_deref() {
            println!("Reference text from {}:\n{}", name, self.form.ref_text());
        }
        Ok(batch)
    }
}
