pub mod mic;
pub mod renderer;

pub use mic::MicController;
pub use renderer::{Color, Frame, Renderer, Shape};

use crate::domain::synthesis::OrchestratorState;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    #[default]
    Idle,
    Thinking,
    Recording,
}

impl From<&OrchestratorState> for AnimationMode {
    fn from(state: &OrchestratorState) -> Self {
        if state.is_generating() {
            AnimationMode::Thinking
        } else {
            AnimationMode::Idle
        }
    }
}

/// Receives rendered frames.
pub trait FrameSink: Send {
    fn present(&mut self, frame: Frame);
}

/// Redraw at a fixed rate until the mode channel closes, reading only the
/// current mode. Returns the sink when done.
pub fn spawn_animation<S>(
    mut renderer: Renderer,
    mut mode_rx: watch::Receiver<AnimationMode>,
    fps: u32,
    mut sink: S,
) -> JoinHandle<S>
where
    S: FrameSink + 'static,
{
    let period = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let mode = *mode_rx.borrow();
                    sink.present(renderer.frame(mode));
                }
                changed = mode_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::debug!("Animation task stopped");
        sink
    })
}

/// Mirror the orchestrator state as an animation mode (Thinking while a
/// request is generating). The task ends when the orchestrator is dropped.
pub fn follow_orchestrator(
    mut state_rx: watch::Receiver<OrchestratorState>,
) -> (watch::Receiver<AnimationMode>, JoinHandle<()>) {
    let initial = AnimationMode::from(&*state_rx.borrow());
    let (mode_tx, mode_rx) = watch::channel(initial);

    let task = tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            let mode = AnimationMode::from(&*state_rx.borrow_and_update());
            mode_tx.send_if_modified(|current| {
                if *current == mode {
                    false
                } else {
                    *current = mode;
                    true
                }
            });
        }
    });

    (mode_rx, task)
}
