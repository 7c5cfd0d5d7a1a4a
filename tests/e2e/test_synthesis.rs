use crate::e2e::helpers;

use helpers::mock_server::TtsBehaviour;
use helpers::{wait_until, TestContext};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::time::Duration;
use tts_studio::controllers::cli::SynthesizeArgs;
use tts_studio::domain::synthesis::{
    CancelStatus, OrchestratorState, RemoteCancel, SubmitOutcome, SynthesisError, ToggleOutcome,
};

fn completed(outcome: SubmitOutcome) -> tts_studio::domain::synthesis::GenerationReport {
    match outcome {
        SubmitOutcome::Completed(report) => report,
        other => panic!("expected a completed generation, got {:?}", other),
    }
}

#[tokio::test]
#[serial]
async fn it_should_generate_audio_and_write_back_the_seed() {
    let ctx = TestContext::new().await.unwrap();
    ctx.references.refresh().await.unwrap();
    ctx.form.update(|f| f.text = "  Hello from the studio.  ".to_string());

    let report = completed(ctx.orchestrator.submit().await.unwrap());

    assert_eq!(report.seed, Some(123456));
    assert_eq!(report.generation_time, Some(1.5));
    assert_eq!(report.audio_size, helpers::mock_server::FAKE_WAV.len());
    assert_eq!(report.status_line, "Audio generated successfully! (20 Bytes)");
    assert_eq!(ctx.form.seed(), Some(123456));
    assert_eq!(ctx.orchestrator.state(), OrchestratorState::Idle);

    let files = ctx.output_files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].to_string_lossy(), report.location);

    let body = ctx.server.with_state(|s| s.tts_requests[0].clone());
    assert_eq!(body["gen_text"], "Hello from the studio.");
    assert_eq!(body["ref_audio"], "default/basic_ref_en.wav");
    assert_eq!(body["ref_text"], "Some call me nature, others call me mother nature.");
    assert_eq!(body["nfe_step"], 32);
    assert_eq!(body["remove_silence"], false);
    assert!(body["seed"].is_null());
    assert_eq!(body["request_id"], report.request_id.as_str());
}

#[tokio::test]
#[serial]
async fn it_should_replace_the_previous_output() {
    let ctx = TestContext::new().await.unwrap();
    ctx.form.update(|f| f.text = "First".to_string());
    let first = completed(ctx.orchestrator.submit().await.unwrap());

    ctx.form.update(|f| f.text = "Second".to_string());
    let second = completed(ctx.orchestrator.submit().await.unwrap());

    assert_ne!(first.location, second.location);
    let files = ctx.output_files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].to_string_lossy(), second.location);
    assert_eq!(ctx.orchestrator.output_location().await, Some(second.location));
}

#[tokio::test]
#[serial]
async fn it_should_send_a_fixed_seed() {
    let ctx = TestContext::new().await.unwrap();
    ctx.form.update(|f| {
        f.text = "Seeded".to_string();
        f.seed = Some(7);
    });

    let report = completed(ctx.orchestrator.submit().await.unwrap());

    assert_eq!(report.seed, Some(7));
    assert_eq!(ctx.server.with_state(|s| s.tts_requests[0]["seed"].clone()), 7);
}

#[tokio::test]
#[serial]
async fn it_should_reject_blank_text_without_calling_the_server() {
    let ctx = TestContext::new().await.unwrap();
    ctx.form.update(|f| f.text = " \n\t ".to_string());

    let err = ctx.orchestrator.submit().await.unwrap_err();

    assert!(matches!(err, SynthesisError::Invalid(_)));
    assert_eq!(err.to_string(), "Please enter some text to convert to speech.");
    assert!(ctx.server.with_state(|s| s.tts_requests.is_empty()));
}

#[tokio::test]
#[serial]
async fn it_should_surface_the_server_detail() {
    let ctx = TestContext::new().await.unwrap();
    ctx.server.configure(|s| {
        s.tts_behaviour = TtsBehaviour::Fail {
            status: 500,
            detail: Some("Error during TTS generation: model not loaded".to_string()),
        }
    });
    ctx.form.update(|f| f.text = "Hello".to_string());

    let err = ctx.orchestrator.submit().await.unwrap_err();

    match err {
        SynthesisError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Error during TTS generation: model not loaded");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(ctx.orchestrator.state(), OrchestratorState::Idle);
    assert!(ctx.output_files().is_empty());
}

#[tokio::test]
#[serial]
async fn it_should_fall_back_to_the_status_code() {
    let ctx = TestContext::new().await.unwrap();
    ctx.server.configure(|s| {
        s.tts_behaviour = TtsBehaviour::Fail {
            status: 502,
            detail: None,
        }
    });
    ctx.form.update(|f| f.text = "Hello".to_string());

    let err = ctx.orchestrator.submit().await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 502");
}

#[tokio::test]
#[serial]
async fn it_should_reject_empty_audio() {
    let ctx = TestContext::new().await.unwrap();
    ctx.server.configure(|s| s.tts_behaviour = TtsBehaviour::Empty);
    ctx.form.update(|f| f.text = "Hello".to_string());

    let err = ctx.orchestrator.submit().await.unwrap_err();

    assert!(matches!(err, SynthesisError::EmptyAudio));
    assert_eq!(err.to_string(), "Received empty audio file");
    assert!(ctx.output_files().is_empty());
}

#[tokio::test]
#[serial]
async fn it_should_report_transport_failures() {
    let ctx = TestContext::with_timeout(Duration::from_millis(200)).await.unwrap();
    ctx.server.configure(|s| s.tts_delay = Duration::from_secs(3));
    ctx.form.update(|f| f.text = "Hello".to_string());

    let err = ctx.orchestrator.submit().await.unwrap_err();

    assert!(matches!(err, SynthesisError::Transport(_)), "got {:?}", err);
    assert_eq!(ctx.orchestrator.state(), OrchestratorState::Idle);
}

#[tokio::test]
#[serial]
async fn it_should_cancel_an_in_flight_request() {
    let ctx = TestContext::new().await.unwrap();
    ctx.server.configure(|s| s.tts_delay = Duration::from_secs(5));
    ctx.form.update(|f| f.text = "A long paragraph".to_string());

    let orchestrator = ctx.orchestrator.clone();
    let submit = tokio::spawn(async move { orchestrator.submit().await });

    assert!(wait_until(|| ctx.server.with_state(|s| !s.in_flight.is_empty())).await);
    let cancelled = ctx.orchestrator.cancel().await.unwrap();

    assert_eq!(cancelled.remote, RemoteCancel::Cancelled);
    assert_eq!(ctx.orchestrator.state(), OrchestratorState::Idle);

    let outcome = submit.await.unwrap().unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Cancelled {
            request_id: cancelled.request_id.clone()
        }
    );
    assert_eq!(
        ctx.server.with_state(|s| s.cancel_requests.clone()),
        vec![cancelled.request_id]
    );
    assert!(ctx.output_files().is_empty());
    assert_eq!(ctx.form.seed(), None);
}

#[tokio::test]
#[serial]
async fn it_should_reject_a_second_submit_and_toggle_to_cancel() {
    let ctx = TestContext::new().await.unwrap();
    ctx.server.configure(|s| s.tts_delay = Duration::from_secs(5));
    ctx.form.update(|f| f.text = "Hello".to_string());

    let orchestrator = ctx.orchestrator.clone();
    let submit = tokio::spawn(async move { orchestrator.submit().await });
    assert!(wait_until(|| ctx.orchestrator.is_generating()).await);

    assert!(matches!(
        ctx.orchestrator.submit().await,
        Err(SynthesisError::Busy)
    ));

    let toggled = ctx.orchestrator.toggle().await.unwrap();
    assert!(matches!(toggled, ToggleOutcome::Cancelled(_)));
    assert!(matches!(
        submit.await.unwrap().unwrap(),
        SubmitOutcome::Cancelled { .. }
    ));
    assert_eq!(ctx.server.with_state(|s| s.tts_requests.len()), 1);
}

#[tokio::test]
#[serial]
async fn it_should_refuse_to_cancel_when_idle() {
    let ctx = TestContext::new().await.unwrap();

    assert!(matches!(
        ctx.orchestrator.cancel().await,
        Err(SynthesisError::NotGenerating)
    ));
    assert!(ctx.server.with_state(|s| s.cancel_requests.is_empty()));
}

#[tokio::test]
#[serial]
async fn it_should_synthesize_through_the_controller() {
    let ctx = TestContext::new().await.unwrap();
    let transcript = ctx
        .fixtures
        .text("zh.txt", "Reference transcript from a file.\n")
        .unwrap();

    let args = SynthesizeArgs {
        text: "Hello".to_string(),
        ref_audio: Some("default/basic_ref_zh.wav".to_string()),
        ref_text_file: Some(transcript),
        speed: Some(0.8),
        no_animation: true,
        ..Default::default()
    };

    let outcome = ctx
        .synthesis_controller
        .synthesize_until(args, std::future::pending())
        .await
        .unwrap();

    assert!(matches!(outcome, SubmitOutcome::Completed(_)));
    let body = ctx.server.with_state(|s| s.tts_requests[0].clone());
    assert_eq!(body["ref_audio"], "default/basic_ref_zh.wav");
    assert_eq!(body["ref_text"], "Reference transcript from a file.");
    assert_eq!(body["speed"].as_f64().map(|s| (s * 10.0).round()), Some(8.0));
}

#[tokio::test]
#[serial]
async fn it_should_cancel_when_interrupted() {
    let ctx = TestContext::new().await.unwrap();
    ctx.server.configure(|s| s.tts_delay = Duration::from_secs(5));

    let args = SynthesizeArgs {
        text: "Hello".to_string(),
        ..Default::default()
    };
    let interrupt = tokio::time::sleep(Duration::from_millis(300));

    let outcome = ctx
        .synthesis_controller
        .synthesize_until(args, interrupt)
        .await
        .unwrap();

    assert!(matches!(outcome, SubmitOutcome::Cancelled { .. }));
    assert_eq!(ctx.server.with_state(|s| s.cancel_requests.len()), 1);
    assert!(ctx.output_files().is_empty());
}

#[tokio::test]
#[serial]
async fn it_should_cancel_by_request_id() {
    let ctx = TestContext::new().await.unwrap();

    let ack = ctx.synthesis_controller.cancel("finished-request").await.unwrap();

    assert_eq!(ack.status, CancelStatus::AlreadyCompleted);
    assert_eq!(
        ctx.server.with_state(|s| s.cancel_requests.clone()),
        vec!["finished-request".to_string()]
    );
}
