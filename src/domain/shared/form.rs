use parking_lot::Mutex;
use std::sync::Arc;

pub const DEFAULT_SPEED: f32 = 1.0;
pub const DEFAULT_NFE_STEP: u32 = 32;
pub const DEFAULT_CROSS_FADE_DURATION: f32 = 0.15;

/// User-editable synthesis inputs.
///
/// Services read a snapshot when they need it and write back the fields the
/// server decides (seed) or that follow other selections (reference text).
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisForm {
    pub text: String,
    pub speed: f32,
    pub nfe_step: u32,
    pub cross_fade_duration: f32,
    pub remove_silence: bool,
    pub seed: Option<u64>,
    pub ref_audio: String,
    pub ref_text: String,
}

impl Default for SynthesisForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            speed: DEFAULT_SPEED,
            nfe_step: DEFAULT_NFE_STEP,
            cross_fade_duration: DEFAULT_CROSS_FADE_DURATION,
            remove_silence: false,
            seed: None,
            ref_audio: String::new(),
            ref_text: String::new(),
        }
    }
}

/// Shared handle to the form, cloned into every service that reads or
/// updates it.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    inner: Arc<Mutex<SynthesisForm>>,
}

impl FormState {
    pub fn new(form: SynthesisForm) -> Self {
        Self {
            inner: Arc::new(Mutex::new(form)),
        }
    }

    pub fn snapshot(&self) -> SynthesisForm {
        self.inner.lock().clone()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut SynthesisForm) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn seed(&self) -> Option<u64> {
        self.inner.lock().seed
    }

    pub fn ref_text(&self) -> String {
        self.inner.lock().ref_text.clone()
    }
}
