use std::fmt;

/// A file refused by client-side validation, with the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    pub filename: String,
    pub reason: String,
}

impl fmt::Display for RejectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.filename, self.reason)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no files selected")]
    NoFiles,
    #[error("invalid files: {}", join_rejected(.0))]
    Invalid(Vec<RejectedFile>),
    #[error("an upload batch is already in progress")]
    BatchInProgress,
}

fn join_rejected(rejected: &[RejectedFile]) -> String {
    rejected
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
