pub mod dto;
pub mod error;
pub mod model;
pub mod orchestrator;

pub use dto::{CancelAck, CancelStatus, SynthesisRequest, SynthesizedAudio};
pub use error::SynthesisError;
pub use model::{
    CancelOutcome, GenerationReport, OrchestratorState, RemoteCancel, SubmitOutcome, ToggleOutcome,
};
pub use orchestrator::RequestOrchestrator;
