use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use crate::{
    controllers::{cli::SynthesizeArgs, load_files},
    domain::{
        animation::{follow_orchestrator, spawn_animation, AnimationMode, Frame, FrameSink, Renderer, Shape},
        reference_audio::ReferenceAudioManager,
        shared::format_speed,
        synthesis::{
            CancelAck, CancelOutcome, CancelStatus, GenerationReport, RemoteCancel, RequestOrchestrator,
            SubmitOutcome,
        },
        transcript::TranscriptUploader,
    },
    error::{AppError, AppResult},
    infrastructure::repositories::TtsRepository,
};

pub struct SynthesisController {
    orchestrator: Arc<RequestOrchestrator>,
    references: Arc<ReferenceAudioManager>,
    transcripts: Arc<TranscriptUploader>,
    tts_repo: Arc<dyn TtsRepository>,
    animation_fps: u32,
}

impl SynthesisController {
    pub fn new(
        orchestrator: Arc<RequestOrchestrator>,
        references: Arc<ReferenceAudioManager>,
        transcripts: Arc<TranscriptUploader>,
        tts_repo: Arc<dyn TtsRepository>,
        animation_fps: u32,
    ) -> Self {
        Self {
            orchestrator,
            references,
            transcripts,
            tts_repo,
            animation_fps,
        }
    }

    /// `synthesize` - generate speech, cancelling on Ctrl-C
    pub async fn synthesize(&self, args: SynthesizeArgs) -> AppResult<SubmitOutcome> {
        self.synthesize_until(args, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Generate speech; the request is cancelled if `interrupt` completes
    /// first.
    pub async fn synthesize_until<I>(&self, args: SynthesizeArgs, interrupt: I) -> AppResult<SubmitOutcome>
    where
        I: Future<Output = ()>,
    {
        self.prepare_form(&args).await?;

        let animation = (!args.no_animation).then(|| {
            let (mode_rx, follow) = follow_orchestrator(self.orchestrator.subscribe());
            let renderer = Renderer::new(200.0, 200.0, &mut fastrand::Rng::new());
            let sink = TerminalSink::new(std::io::stderr());
            (follow, spawn_animation(renderer, mode_rx, self.animation_fps, sink))
        });

        let outcome = self.submit_until(interrupt).await;

        if let Some((follow, task)) = animation {
            // dropping the mode sender stops the animation task
            follow.abort();
            let _ = follow.await;
            if let Ok(mut sink) = task.await {
                sink.clear();
            }
        }

        let outcome = outcome?;
        println!("{}", describe_submit(&outcome));
        Ok(outcome)
    }

    /// `cancel <request-id>` - notify the server directly
    pub async fn cancel(&self, request_id: &str) -> AppResult<CancelAck> {
        if request_id.trim().is_empty() {
            return Err(AppError::BadRequest("request id cannot be empty".to_string()));
        }

        let ack = self.tts_repo.cancel(request_id).await?;
        tracing::info!(request_id = %request_id, status = ?ack.status, "Cancellation sent");

        let line = match ack.status {
            CancelStatus::Cancelled => format!("Request {} cancelled", request_id),
            CancelStatus::AlreadyCompleted => format!("Request {} had already completed", request_id),
            CancelStatus::Unknown => format!("Server answered: {}", ack.message),
        };
        println!("{}", line);
        Ok(ack)
    }

    async fn prepare_form(&self, args: &SynthesizeArgs) -> AppResult<()> {
        self.references.refresh().await?;
        if let Some(id) = args.ref_audio.as_deref() {
            self.references.select(id)?;
        }

        if let Some(path) = args.ref_text_file.as_ref() {
            let batch = self.transcripts.upload(load_files(std::slice::from_ref(path)).await?).await?;
            if batch.applied_from.is_none() {
                return Err(AppError::BadRequest(batch.result.summary()));
            }
        }

        let form = self.orchestrator.form();
        if let Some(ref_text) = args.ref_text.as_ref() {
            form.update(|form| form.ref_text = ref_text.clone());
        }
        form.update(|form| args.apply(form));

        let snapshot = form.snapshot();
        tracing::info!(
            ref_audio = %snapshot.ref_audio,
            speed = %format_speed(snapshot.speed),
            nfe_step = snapshot.nfe_step,
            seed = ?snapshot.seed,
            "Form ready"
        );
        Ok(())
    }

    async fn submit_until<I>(&self, interrupt: I) -> AppResult<SubmitOutcome>
    where
        I: Future<Output = ()>,
    {
        let submit = self.orchestrator.submit();
        tokio::pin!(submit);

        tokio::select! {
            outcome = &mut submit => Ok(outcome?),
            _ = interrupt => {
                match self.orchestrator.cancel().await {
                    Ok(cancelled) => eprintln!("{}", describe_cancel(&cancelled)),
                    // the request settled just before the interrupt
                    Err(e) => tracing::debug!(error = %e, "Nothing to cancel"),
                }
                Ok(submit.await?)
            }
        }
    }
}

pub fn describe_submit(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Completed(report) => describe_report(report),
        SubmitOutcome::Cancelled { request_id } => format!("Generation cancelled (request {})", request_id),
    }
}

fn describe_report(report: &GenerationReport) -> String {
    let mut lines = vec![
        report.status_line.clone(),
        format!("  saved to:        {}", report.location),
        format!("  request id:      {}", report.request_id),
    ];
    if let Some(time) = report.generation_time {
        lines.push(format!("  generation time: {:.2}s", time));
    }
    if let Some(seed) = report.seed {
        lines.push(format!("  seed:            {}", seed));
    }
    lines.push(format!("  round trip:      {:.2}s", report.round_trip.as_secs_f64()));
    lines.join("\n")
}

pub fn describe_cancel(outcome: &CancelOutcome) -> String {
    let remote = match &outcome.remote {
        RemoteCancel::Cancelled => "server stopped the request".to_string(),
        RemoteCancel::AlreadyCompleted => "server had already finished it".to_string(),
        RemoteCancel::Unconfirmed(reason) => format!("server did not confirm: {}", reason),
    };
    format!("Cancelling request {} ({})", outcome.request_id, remote)
}

/// Draws a one-line pulse on a terminal while the mode is not Idle.
pub struct TerminalSink<W> {
    out: W,
    drawn: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, drawn: false }
    }

    pub fn clear(&mut self) {
        if self.drawn {
            let written = write!(self.out, "\r{:width$}\r", "", width = PULSE_WIDTH + 24);
            self.finish(written);
            self.drawn = false;
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn finish(&mut self, written: std::io::Result<()>) {
        if let Err(e) = written.and_then(|_| self.out.flush()) {
            tracing::debug!(error = %e, "Failed to draw animation frame");
        }
    }
}

const PULSE_WIDTH: usize = 20;

impl<W: Write + Send> FrameSink for TerminalSink<W> {
    fn present(&mut self, frame: Frame) {
        let label = match frame.mode {
            AnimationMode::Idle => {
                self.clear();
                return;
            }
            AnimationMode::Thinking => "Generating speech",
            AnimationMode::Recording => "Recording",
        };

        let written = write!(self.out, "\r[{:<width$}] {}", pulse(&frame), label, width = PULSE_WIDTH);
        self.finish(written);
        self.drawn = true;
    }
}

/// Bar whose length follows the largest circle in the frame (radius 60..100).
fn pulse(frame: &Frame) -> String {
    let radius = frame
        .shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::RadialCircle { radius, .. } => Some(*radius),
            _ => None,
        })
        .fold(0.0_f64, f64::max);

    let filled = (((radius - 60.0) / 40.0).clamp(0.0, 1.0) * PULSE_WIDTH as f64).round() as usize;
    "=".repeat(filled)
}
