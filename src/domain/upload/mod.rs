pub mod batch;
pub mod error;
pub mod model;
pub mod validation;

pub use batch::{run_sequential, BatchGuard, BatchPermit};
pub use error::{RejectedFile, UploadError};
pub use model::{FailedUpload, UploadBatchResult, UploadFile};
pub use validation::{validate_batch, FileRule, REFERENCE_AUDIO_RULE, TRANSCRIPT_RULE};
