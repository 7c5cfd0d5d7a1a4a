use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_studio::controllers::cli::{Cli, Commands, RefsCommand, TranscriptCommand};
use tts_studio::controllers::{
    ref_audio::RefAudioController, synthesis::SynthesisController, transcript::TranscriptController,
};
use tts_studio::domain::reference_audio::ReferenceAudioManager;
use tts_studio::domain::shared::FormState;
use tts_studio::domain::synthesis::RequestOrchestrator;
use tts_studio::domain::transcript::TranscriptUploader;
use tts_studio::error::AppResult;
use tts_studio::infrastructure::audio::{AudioSlot, FileAudioBackend};
use tts_studio::infrastructure::config::{Config, LogFormat};
use tts_studio::infrastructure::repositories::HttpTtsRepository;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        base_url = %config.tts_base_url,
        output_dir = %config.output_dir.display(),
        "Starting TTS Studio"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the TTS server gateway
    let repo = Arc::new(HttpTtsRepository::new(&config.tts_base_url, config.request_timeout())?);

    // 2. Shared form and audio output slots
    let form = FormState::new(config.default_form());
    let output = AudioSlot::new(
        "output",
        Arc::new(FileAudioBackend::new(&config.output_dir, "tts-output")),
    );
    let preview = AudioSlot::new(
        "preview",
        Arc::new(FileAudioBackend::new(&config.output_dir, "ref-preview")),
    );

    // 3. Instantiate services (inject gateway and form)
    let orchestrator = Arc::new(RequestOrchestrator::new(repo.clone(), form.clone(), output));
    let references = Arc::new(ReferenceAudioManager::new(repo.clone(), form.clone(), preview));
    let transcripts = Arc::new(TranscriptUploader::new(repo.clone(), form.clone()));

    // 4. Instantiate controllers (inject services)
    let synthesis_controller = SynthesisController::new(
        orchestrator,
        references.clone(),
        transcripts.clone(),
        repo,
        config.animation_fps,
    );
    let ref_audio_controller = RefAudioController::new(references);
    let transcript_controller = TranscriptController::new(transcripts, form);

    let result: AppResult<()> = match cli.command {
        Commands::Synthesize(args) => synthesis_controller.synthesize(args).await.map(drop),
        Commands::Cancel { request_id } => synthesis_controller.cancel(&request_id).await.map(drop),
        Commands::Refs { command } => match command {
            RefsCommand::List => ref_audio_controller.list().await.map(drop),
            RefsCommand::Preview { id } => ref_audio_controller.preview(&id).await.map(drop),
            RefsCommand::Upload { files } => ref_audio_controller.upload(&files).await.map(drop),
            RefsCommand::Delete { id } => ref_audio_controller.delete(&id).await.map(drop),
        },
        Commands::Transcript { command } => match command {
            TranscriptCommand::Upload { files } => transcript_controller.upload(&files).await.map(drop),
        },
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            let code = e.report();
            eprintln!("Error: {}", e);
            Ok(ExitCode::from(code as u8))
        }
    }
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "tts_studio=debug"
    } else {
        "tts_studio=info"
    };

    // logs go to stderr so command output on stdout stays clean
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
