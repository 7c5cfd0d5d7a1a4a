use std::time::Duration;

/// Published on the orchestrator's watch channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    Generating { request_id: String },
}

impl OrchestratorState {
    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating { .. })
    }
}

/// What a successful generation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub request_id: String,
    pub audio_size: usize,
    /// Where the bound output can be played from.
    pub location: String,
    /// Server-side generation time in seconds, when reported.
    pub generation_time: Option<f64>,
    /// Seed the server used; also written back into the form.
    pub seed: Option<u64>,
    pub round_trip: Duration,
    pub status_line: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed(GenerationReport),
    /// The request was cancelled by the user; not an error.
    Cancelled { request_id: String },
}

/// Server's answer to a cancellation notice. None of these are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCancel {
    Cancelled,
    AlreadyCompleted,
    /// The notice could not be delivered; the client is already idle.
    Unconfirmed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOutcome {
    pub request_id: String,
    pub remote: RemoteCancel,
}

/// Result of the single start/stop control.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    Submitted(SubmitOutcome),
    Cancelled(CancelOutcome),
}
