pub mod animation;
pub mod reference_audio;
pub mod shared;
pub mod synthesis;
pub mod transcript;
pub mod upload;
