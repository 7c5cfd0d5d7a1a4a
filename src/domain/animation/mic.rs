use super::AnimationMode;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub const RECORDING_LIMIT: Duration = Duration::from_secs(5);
pub const PROCESSING_TIME: Duration = Duration::from_secs(3);

/// Microphone button for the conversation view.
///
/// Idle -> Recording on press; Recording -> Thinking on press or after the
/// recording limit; Thinking -> Idle after the processing time. Presses
/// while Thinking are ignored.
pub struct MicController {
    mode_tx: watch::Sender<AnimationMode>,
    /// Bumped on every transition so stale timers do nothing.
    epoch: Mutex<u64>,
    recording_limit: Duration,
    processing_time: Duration,
}

impl MicController {
    pub fn new(recording_limit: Duration, processing_time: Duration) -> Arc<Self> {
        let (mode_tx, _) = watch::channel(AnimationMode::Idle);
        Arc::new(Self {
            mode_tx,
            epoch: Mutex::new(0),
            recording_limit,
            processing_time,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<AnimationMode> {
        self.mode_tx.subscribe()
    }

    pub fn mode(&self) -> AnimationMode {
        *self.mode_tx.borrow()
    }

    /// Handle a button press and return the resulting mode.
    pub fn press(self: &Arc<Self>) -> AnimationMode {
        match self.mode() {
            AnimationMode::Idle => self.start_recording(),
            AnimationMode::Recording => self.stop_recording(),
            AnimationMode::Thinking => tracing::debug!("Mic press ignored while processing"),
        }
        self.mode()
    }

    fn start_recording(self: &Arc<Self>) {
        let epoch = self.transition(AnimationMode::Recording);
        tracing::info!("Started recording");
        self.schedule(epoch, self.recording_limit, |mic| mic.stop_recording());
    }

    fn stop_recording(self: &Arc<Self>) {
        let epoch = self.transition(AnimationMode::Thinking);
        tracing::info!("Processing recording");
        self.schedule(epoch, self.processing_time, |mic| mic.stop_processing());
    }

    fn stop_processing(self: &Arc<Self>) {
        self.transition(AnimationMode::Idle);
        tracing::info!("Ready for next interaction");
    }

    fn transition(&self, mode: AnimationMode) -> u64 {
        let mut epoch = self.epoch.lock();
        *epoch += 1;
        self.mode_tx.send_replace(mode);
        *epoch
    }

    fn schedule(self: &Arc<Self>, epoch: u64, delay: Duration, action: fn(&Arc<Self>)) {
        let mic = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(mic) = mic.upgrade() else {
                return;
            };
            if *mic.epoch.lock() == epoch {
                action(&mic);
            }
        });
    }
}
