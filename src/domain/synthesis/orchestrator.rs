use super::dto::{CancelStatus, SynthesisRequest};
use super::error::SynthesisError;
use super::model::{
    CancelOutcome, GenerationReport, OrchestratorState, RemoteCancel, SubmitOutcome, ToggleOutcome,
};
use crate::domain::shared::{format_file_size, FormState};
use crate::infrastructure::audio::AudioSlot;
use crate::infrastructure::repositories::TtsRepository;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// The one request allowed in flight.
struct InFlight {
    request_id: String,
    token: CancellationToken,
}

/// Owns the synthesis request lifecycle: Idle -> Generating -> Idle.
///
/// At most one request is in flight. The slot holding it is only touched
/// through `begin`, `settle` and `cancel`, so each request leaves
/// Generating exactly once.
pub struct RequestOrchestrator {
    repo: Arc<dyn TtsRepository>,
    form: FormState,
    output: tokio::sync::Mutex<AudioSlot>,
    current: Mutex<Option<InFlight>>,
    state_tx: watch::Sender<OrchestratorState>,
}

impl RequestOrchestrator {
    pub fn new(repo: Arc<dyn TtsRepository>, form: FormState, output: AudioSlot) -> Self {
        let (state_tx, _) = watch::channel(OrchestratorState::Idle);
        Self {
            repo,
            form,
            output: tokio::sync::Mutex::new(output),
            current: Mutex::new(None),
            state_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<OrchestratorState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> OrchestratorState {
        self.state_tx.borrow().clone()
    }

    pub fn is_generating(&self) -> bool {
        self.current.lock().is_some()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Location of the currently bound output audio, if any.
    pub async fn output_location(&self) -> Option<String> {
        self.output
            .lock()
            .await
            .current()
            .map(|handle| handle.location().to_string())
    }

    /// Submit the current form. Empty text is rejected before any network
    /// call; a second submission while one is in flight is rejected as busy.
    pub async fn submit(&self) -> Result<SubmitOutcome, SynthesisError> {
        let form = self.form.snapshot();
        if form.text.trim().is_empty() {
            return Err(SynthesisError::Invalid(
                "Please enter some text to convert to speech.".to_string(),
            ));
        }

        let request = SynthesisRequest::from_form(&form, Uuid::new_v4().to_string());
        let token = self.begin(&request.request_id)?;
        let started = Instant::now();

        let response = tokio::select! {
            _ = token.cancelled() => None,
            result = self.repo.synthesize(&request) => Some(result),
        };

        if !self.settle(&request.request_id) {
            // cancel() already moved us back to Idle
            tracing::info!(request_id = %request.request_id, "Discarding response of cancelled request");
            return Ok(SubmitOutcome::Cancelled {
                request_id: request.request_id,
            });
        }

        let Some(response) = response else {
            return Ok(SubmitOutcome::Cancelled {
                request_id: request.request_id,
            });
        };

        let audio = response.map_err(|e| {
            tracing::error!(request_id = %request.request_id, error = %e, "TTS request failed");
            SynthesisError::from(e)
        })?;

        if audio.audio.is_empty() {
            tracing::error!(request_id = %request.request_id, "TTS server returned an empty body");
            return Err(SynthesisError::EmptyAudio);
        }

        let location = {
            let mut output = self.output.lock().await;
            output.replace(&audio.audio).await?.location().to_string()
        };

        if let Some(seed) = audio.seed {
            self.form.update(|form| form.seed = Some(seed));
        }

        let report = GenerationReport {
            request_id: request.request_id,
            audio_size: audio.audio.len(),
            location,
            generation_time: audio.generation_time,
            seed: audio.seed,
            round_trip: started.elapsed(),
            status_line: format!(
                "Audio generated successfully! ({})",
                format_file_size(audio.audio.len() as u64)
            ),
        };

        tracing::info!(
            request_id = %report.request_id,
            audio_size = report.audio_size,
            generation_time = ?report.generation_time,
            seed = ?report.seed,
            location = %report.location,
            "Synthesis completed"
        );

        Ok(SubmitOutcome::Completed(report))
    }

    /// Stop the in-flight request. The transport is cancelled and the state
    /// returns to Idle before the server is notified; the notice itself is
    /// best effort.
    pub async fn cancel(&self) -> Result<CancelOutcome, SynthesisError> {
        let in_flight = self
            .current
            .lock()
            .take()
            .ok_or(SynthesisError::NotGenerating)?;

        in_flight.token.cancel();
        self.state_tx.send_replace(OrchestratorState::Idle);
        tracing::info!(request_id = %in_flight.request_id, "Synthesis request cancelled");

        let remote = match self.repo.cancel(&in_flight.request_id).await {
            Ok(ack) => match ack.status {
                CancelStatus::Cancelled => RemoteCancel::Cancelled,
                CancelStatus::AlreadyCompleted => {
                    tracing::info!(
                        request_id = %in_flight.request_id,
                        "Server had already completed the request"
                    );
                    RemoteCancel::AlreadyCompleted
                }
                CancelStatus::Unknown => RemoteCancel::Unconfirmed(ack.message),
            },
            Err(e) => {
                tracing::warn!(
                    request_id = %in_flight.request_id,
                    error = %e,
                    "Failed to notify server of cancellation"
                );
                RemoteCancel::Unconfirmed(e.to_string())
            }
        };

        Ok(CancelOutcome {
            request_id: in_flight.request_id,
            remote,
        })
    }

    /// Start when idle, stop when generating.
    pub async fn toggle(&self) -> Result<ToggleOutcome, SynthesisError> {
        if self.is_generating() {
            self.cancel().await.map(ToggleOutcome::Cancelled)
        } else {
            self.submit().await.map(ToggleOutcome::Submitted)
        }
    }

    /// Release the bound output audio, e.g. before shutting down a player.
    pub async fn clear_output(&self) {
        self.output.lock().await.clear().await;
    }

    fn begin(&self, request_id: &str) -> Result<CancellationToken, SynthesisError> {
        let mut current = self.current.lock();
        if current.is_some() {
            return Err(SynthesisError::Busy);
        }

        let token = CancellationToken::new();
        *current = Some(InFlight {
            request_id: request_id.to_string(),
            token: token.clone(),
        });
        self.state_tx.send_replace(OrchestratorState::Generating {
            request_id: request_id.to_string(),
        });

        tracing::info!(request_id = %request_id, "Synthesis request started");
        Ok(token)
    }

    /// Leave Generating for `request_id`. Returns false when the request is
    /// no longer the current one (it was cancelled meanwhile).
    fn settle(&self, request_id: &str) -> bool {
        let mut current = self.current.lock();
        match current.as_ref() {
            Some(in_flight) if in_flight.request_id == request_id => {
                *current = None;
                self.state_tx.send_replace(OrchestratorState::Idle);
                true
            }
            _ => false,
        }
    }
}
