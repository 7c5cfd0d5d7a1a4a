use super::dto::{DeleteAck, UploadedRefAudio};
use super::error::ReferenceAudioError;
use super::model::{RefAudioCatalog, RefAudioCategory, RefAudioEntry};
use crate::domain::shared::FormState;
use crate::domain::upload::{
    run_sequential, validate_batch, BatchGuard, UploadBatchResult, UploadFile, REFERENCE_AUDIO_RULE,
};
use crate::infrastructure::audio::AudioSlot;
use crate::infrastructure::repositories::ReferenceAudioRepository;
use moka::future::Cache;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Selection {
    catalog: RefAudioCatalog,
    selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceUploadBatch {
    pub result: UploadBatchResult,
    /// Entry selected after the batch: the last file that uploaded. None
    /// when nothing uploaded or the catalog could not be reloaded.
    pub selected: Option<String>,
}

/// Lists, selects, previews, uploads and deletes reference clips, keeping
/// the form's reference audio and reference text in step with the
/// selection.
pub struct ReferenceAudioManager {
    repo: Arc<dyn ReferenceAudioRepository>,
    form: FormState,
    state: Mutex<Selection>,
    preview: tokio::sync::Mutex<AudioSlot>,
    /// Clip bytes by entry id. A CLI invocation previews at most once, so
    /// hits only happen for callers that keep the manager alive.
    preview_cache: Cache<String, Arc<Vec<u8>>>,
    guard: BatchGuard,
}

impl ReferenceAudioManager {
    pub fn new(repo: Arc<dyn ReferenceAudioRepository>, form: FormState, preview: AudioSlot) -> Self {
        let preview_cache = Cache::builder()
            .max_capacity(32)
            .time_to_idle(Duration::from_secs(10 * 60))
            .build();

        Self {
            repo,
            form,
            state: Mutex::new(Selection::default()),
            preview: tokio::sync::Mutex::new(preview),
            preview_cache,
            guard: BatchGuard::new(),
        }
    }

    pub fn catalog(&self) -> RefAudioCatalog {
        self.state.lock().catalog.clone()
    }

    pub fn selected(&self) -> Option<String> {
        self.state.lock().selected.clone()
    }

    pub fn is_uploading(&self) -> bool {
        self.guard.is_busy()
    }

    /// Reload the catalog. The selection survives when its entry is still
    /// listed; otherwise the server default (or first entry) is selected.
    pub async fn refresh(&self) -> Result<RefAudioCatalog, ReferenceAudioError> {
        let listing = self.repo.list().await?;
        let catalog = RefAudioCatalog::from_listing(listing);

        let changed = {
            let mut state = self.state.lock();
            state.catalog = catalog.clone();

            let keep = state
                .selected
                .as_deref()
                .map(|id| catalog.contains(id))
                .unwrap_or(false);

            if keep {
                None
            } else {
                state.selected = catalog.fallback_id().map(str::to_string);
                Some(state.selected.as_deref().and_then(|id| catalog.get(id)).cloned())
            }
        };

        if let Some(entry) = changed {
            self.apply_to_form(entry.as_ref());
        }

        tracing::info!(
            entries = catalog.entries().len(),
            custom = catalog.in_category(RefAudioCategory::Custom).len(),
            selected = ?self.selected(),
            "Reference audio catalog refreshed"
        );

        Ok(catalog)
    }

    /// Select an entry and copy its transcript into the reference text.
    pub fn select(&self, id: &str) -> Result<RefAudioEntry, ReferenceAudioError> {
        let entry = {
            let mut state = self.state.lock();
            let entry = state
                .catalog
                .get(id)
                .cloned()
                .ok_or_else(|| ReferenceAudioError::NotFound(id.to_string()))?;
            state.selected = Some(entry.id.clone());
            entry
        };

        self.apply_to_form(Some(&entry));
        tracing::debug!(id = %entry.id, "Reference audio selected");
        Ok(entry)
    }

    /// Fetch a clip and bind it to the preview player, replacing whatever
    /// was previewed before.
    pub async fn preview(&self, id: &str) -> Result<String, ReferenceAudioError> {
        let audio = match self.preview_cache.get(id).await {
            Some(cached) => cached,
            None => {
                let fetched = Arc::new(self.repo.fetch(id).await?);
                self.preview_cache.insert(id.to_string(), fetched.clone()).await;
                fetched
            }
        };

        let mut preview = self.preview.lock().await;
        let handle = preview.replace(&audio).await?;
        Ok(handle.location().to_string())
    }

    /// Validate the whole batch, then upload one file at a time. Individual
    /// failures are collected; the catalog is refreshed afterwards and the
    /// last uploaded entry becomes the selection.
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<ReferenceUploadBatch, ReferenceAudioError> {
        let _permit = self.guard.try_acquire()?;
        validate_batch(&files, &REFERENCE_AUDIO_RULE)?;

        let repo = self.repo.clone();
        let (result, uploaded) = run_sequential(files, |file| {
            let repo = repo.clone();
            async move { repo.upload(&file).await.map_err(|e| e.to_string()) }
        })
        .await;

        for stored in &uploaded {
            self.preview_cache.invalidate(&stored.filename).await;
            self.preview_cache
                .invalidate(&format!("custom/{}", stored.filename))
                .await;
        }

        let mut selected = None;
        if !uploaded.is_empty() {
            match self.refresh().await {
                Ok(catalog) => {
                    if let Some(id) = uploaded.last().and_then(|u| resolve_uploaded_id(&catalog, u)) {
                        selected = Some(self.select(&id)?.id);
                    }
                }
                Err(e) => tracing::warn!(
                    error = %e,
                    succeeded = result.succeeded.len(),
                    "Uploaded reference audio but could not reload the catalog"
                ),
            }
        }

        Ok(ReferenceUploadBatch { result, selected })
    }

    /// Delete a custom entry. Default entries are refused before any
    /// network call.
    pub async fn delete(&self, id: &str) -> Result<DeleteAck, ReferenceAudioError> {
        if RefAudioCategory::of(id) != RefAudioCategory::Custom {
            tracing::warn!(id = %id, "Refusing to delete default reference audio");
            return Err(ReferenceAudioError::NotDeletable(id.to_string()));
        }

        let ack = self.repo.delete(id).await?;
        self.preview_cache.invalidate(id).await;
        tracing::info!(id = %id, status = %ack.status, message = %ack.message, "Reference audio deleted");

        self.refresh().await?;
        Ok(ack)
    }

    pub async fn clear_preview(&self) {
        self.preview.lock().await.clear().await;
    }

    fn apply_to_form(&self, entry: Option<&RefAudioEntry>) {
        self.form.update(|form| match entry {
            Some(entry) => {
                form.ref_audio = entry.id.clone();
                form.ref_text = entry.transcript.clone();
            }
            None => {
                form.ref_audio.clear();
                form.ref_text.clear();
            }
        });
    }
}

/// The server answers an upload with the stored file name, with or without
/// the category prefix.
fn resolve_uploaded_id(catalog: &RefAudioCatalog, uploaded: &UploadedRefAudio) -> Option<String> {
    if catalog.contains(&uploaded.filename) {
        return Some(uploaded.filename.clone());
    }
    let prefixed = format!("custom/{}", uploaded.filename);
    catalog.contains(&prefixed).then_some(prefixed)
}
