use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tts_studio::controllers::{
    ref_audio::RefAudioController, synthesis::SynthesisController, transcript::TranscriptController,
};
use tts_studio::domain::reference_audio::ReferenceAudioManager;
use tts_studio::domain::shared::{FormState, SynthesisForm};
use tts_studio::domain::synthesis::RequestOrchestrator;
use tts_studio::domain::transcript::TranscriptUploader;
use tts_studio::infrastructure::audio::{AudioSlot, FileAudioBackend};
use tts_studio::infrastructure::repositories::HttpTtsRepository;

pub mod fixtures;

use fixtures::TestFixtures;
use mock_server::MockTtsServer;

/// Full client stack wired against a fresh mock TTS server, writing audio
/// into a temporary output directory.
pub struct TestContext {
    pub server: MockTtsServer,
    pub form: FormState,
    pub orchestrator: Arc<RequestOrchestrator>,
    pub references: Arc<ReferenceAudioManager>,
    pub transcripts: Arc<TranscriptUploader>,
    pub synthesis_controller: SynthesisController,
    pub ref_audio_controller: RefAudioController,
    pub transcript_controller: TranscriptController,
    pub fixtures: TestFixtures,
    output_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30)).await
    }

    pub async fn with_timeout(timeout: Duration) -> Result<Self> {
        let server = MockTtsServer::start().await?;
        let output_dir = tempfile::tempdir()?;

        let repo = Arc::new(HttpTtsRepository::new(&server.base_url, timeout)?);
        let form = FormState::new(SynthesisForm::default());

        let output = AudioSlot::new(
            "output",
            Arc::new(FileAudioBackend::new(output_dir.path(), "tts-output")),
        );
        let preview = AudioSlot::new(
            "preview",
            Arc::new(FileAudioBackend::new(output_dir.path(), "ref-preview")),
        );

        let orchestrator = Arc::new(RequestOrchestrator::new(repo.clone(), form.clone(), output));
        let references = Arc::new(ReferenceAudioManager::new(repo.clone(), form.clone(), preview));
        let transcripts = Arc::new(TranscriptUploader::new(repo.clone(), form.clone()));

        let synthesis_controller = SynthesisController::new(
            orchestrator.clone(),
            references.clone(),
            transcripts.clone(),
            repo,
            30,
        );
        let ref_audio_controller = RefAudioController::new(references.clone());
        let transcript_controller = TranscriptController::new(transcripts.clone(), form.clone());

        let fixtures = TestFixtures::new()?;

        Ok(Self {
            server,
            form,
            orchestrator,
            references,
            transcripts,
            synthesis_controller,
            ref_audio_controller,
            transcript_controller,
            fixtures,
            output_dir,
        })
    }

    /// Files currently present in the output directory.
    pub fn output_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(self.output_dir.path())
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default();
        files.sort();
        files
    }
}

/// Poll until `check` holds or two seconds pass.
pub async fn wait_until(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
