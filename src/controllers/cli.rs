use crate::domain::shared::SynthesisForm;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// TTS Studio - client for a voice-cloning TTS server
#[derive(Parser, Debug)]
#[command(name = "tts-studio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate speech from text (Ctrl-C cancels)
    Synthesize(SynthesizeArgs),

    /// Manage reference audio clips
    Refs {
        #[command(subcommand)]
        command: RefsCommand,
    },

    /// Manage reference transcripts
    Transcript {
        #[command(subcommand)]
        command: TranscriptCommand,
    },

    /// Ask the server to cancel a request by id
    Cancel {
        /// Request id printed when the request was submitted
        request_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RefsCommand {
    /// List reference clips grouped by category
    List,

    /// Download a clip into the output directory for listening
    Preview { id: String },

    /// Upload one or more audio files as custom reference clips
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Delete a custom reference clip
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TranscriptCommand {
    /// Upload .txt transcripts; the last one becomes the reference text
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SynthesizeArgs {
    /// Text to convert to speech
    pub text: String,

    /// Reference clip id (defaults to the server's default clip)
    #[arg(short = 'r', long = "ref-audio")]
    pub ref_audio: Option<String>,

    /// Reference text; overrides the clip's stored transcript
    #[arg(long = "ref-text")]
    pub ref_text: Option<String>,

    /// Transcript file to upload and use as the reference text
    #[arg(long = "ref-text-file", conflicts_with = "ref_text")]
    pub ref_text_file: Option<PathBuf>,

    #[arg(short = 's', long)]
    pub speed: Option<f32>,

    /// Diffusion step count
    #[arg(long = "nfe-step")]
    pub nfe_step: Option<u32>,

    /// Cross-fade between chunks, in seconds
    #[arg(long = "cross-fade")]
    pub cross_fade: Option<f32>,

    #[arg(long = "remove-silence")]
    pub remove_silence: bool,

    /// Fixed seed; the server picks one when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not draw the progress animation
    #[arg(long = "no-animation")]
    pub no_animation: bool,
}

impl SynthesizeArgs {
    /// Copy the text and any explicitly given parameters into the form.
    /// The reference clip and text are handled by the reference services.
    pub fn apply(&self, form: &mut SynthesisForm) {
        form.text = self.text.clone();
        if let Some(speed) = self.speed {
            form.speed = speed;
        }
        if let Some(nfe_step) = self.nfe_step {
            form.nfe_step = nfe_step;
        }
        if let Some(cross_fade) = self.cross_fade {
            form.cross_fade_duration = cross_fade;
        }
        form.remove_silence = self.remove_silence;
        form.seed = self.seed;
    }
}
