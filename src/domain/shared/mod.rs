pub mod format;
pub mod form;

pub use form::{FormState, SynthesisForm};
pub use format::{format_file_size, format_speed};
