pub mod dto;
pub mod error;
pub mod model;
pub mod service;

pub use dto::{DeleteAck, RefAudioListing, UploadedRefAudio};
pub use error::ReferenceAudioError;
pub use model::{RefAudioCatalog, RefAudioCategory, RefAudioEntry};
pub use service::{ReferenceAudioManager, ReferenceUploadBatch};
