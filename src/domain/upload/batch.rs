use super::error::UploadError;
use super::model::{FailedUpload, UploadBatchResult, UploadFile};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

/// Rejects a second upload batch while one is still running.
#[derive(Debug, Default)]
pub struct BatchGuard {
    busy: AtomicBool,
}

impl BatchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Result<BatchPermit<'_>, UploadError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| UploadError::BatchInProgress)?;
        Ok(BatchPermit { guard: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the duration of a batch; releases the guard on drop.
#[derive(Debug)]
pub struct BatchPermit<'a> {
    guard: &'a BatchGuard,
}

impl Drop for BatchPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

/// Upload files one at a time, in order. A failing file is recorded and the
/// batch carries on with the next one.
///
/// Returns the succeeded/failed partition plus the value each successful
/// upload produced, in the same order as `result.succeeded`.
pub async fn run_sequential<T, F, Fut>(
    files: Vec<UploadFile>,
    mut upload: F,
) -> (UploadBatchResult, Vec<T>)
where
    F: FnMut(UploadFile) -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    let mut result = UploadBatchResult::default();
    let mut values = Vec::new();
    let total = files.len();

    for (index, file) in files.into_iter().enumerate() {
        let filename = file.name.clone();
        tracing::debug!(file = %filename, position = index + 1, total, "Uploading file");

        match upload(file).await {
            Ok(value) => {
                result.succeeded.push(filename);
                values.push(value);
            }
            Err(reason) => {
                tracing::warn!(file = %filename, reason = %reason, "Upload failed");
                result.failed.push(FailedUpload { filename, reason });
            }
        }
    }

    tracing::info!(
        succeeded = result.succeeded.len(),
        failed = result.failed.len(),
        "Upload batch finished"
    );

    (result, values)
}
