pub mod cli;
pub mod ref_audio;
pub mod synthesis;
pub mod transcript;

use crate::domain::upload::UploadFile;
use crate::error::{AppError, AppResult};
use std::path::PathBuf;

/// Stat every path given on the command line; a missing file fails the
/// whole command before anything is uploaded.
pub(crate) async fn load_files(paths: &[PathBuf]) -> AppResult<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = UploadFile::from_path(path)
            .await
            .map_err(|e| AppError::BadRequest(format!("{}: {}", path.display(), e)))?;
        files.push(file);
    }
    Ok(files)
}
