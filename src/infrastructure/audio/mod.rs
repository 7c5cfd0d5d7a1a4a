pub mod file_backend;
pub mod slot;

pub use file_backend::FileAudioBackend;
pub use slot::{AudioBackend, AudioError, AudioHandle, AudioSlot};
