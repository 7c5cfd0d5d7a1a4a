use crate::e2e::helpers;

use helpers::TestContext;
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::path::PathBuf;
use tts_studio::domain::reference_audio::{RefAudioCategory, ReferenceAudioError};
use tts_studio::domain::upload::UploadError;
use tts_studio::error::AppError;

#[tokio::test]
#[serial]
async fn it_should_list_and_select_the_server_default() {
    let ctx = TestContext::new().await.unwrap();
    ctx.server.configure(|s| s.refs.push("custom/alice.wav".to_string()));

    let catalog = ctx.ref_audio_controller.list().await.unwrap();

    let grouped: Vec<(RefAudioCategory, usize)> = catalog
        .grouped()
        .into_iter()
        .map(|(category, entries)| (category, entries.len()))
        .collect();
    assert_eq!(
        grouped,
        vec![(RefAudioCategory::Default, 2), (RefAudioCategory::Custom, 1)]
    );
    assert_eq!(ctx.references.selected().as_deref(), Some("default/basic_ref_en.wav"));

    let form = ctx.form.snapshot();
    assert_eq!(form.ref_audio, "default/basic_ref_en.wav");
    assert_eq!(form.ref_text, "Some call me nature, others call me mother nature.");
}

#[tokio::test]
#[serial]
async fn it_should_clear_the_reference_text_for_entries_without_transcript() {
    let ctx = TestContext::new().await.unwrap();
    ctx.references.refresh().await.unwrap();

    let entry = ctx.references.select("default/basic_ref_zh.wav").unwrap();

    assert_eq!(entry.transcript, "");
    assert_eq!(ctx.form.ref_text(), "");
    assert_eq!(ctx.form.snapshot().ref_audio, "default/basic_ref_zh.wav");
}

#[tokio::test]
#[serial]
async fn it_should_preview_a_clip_into_the_output_directory() {
    let ctx = TestContext::new().await.unwrap();

    let first = ctx.ref_audio_controller.preview("default/basic_ref_en.wav").await.unwrap();
    let second = ctx.ref_audio_controller.preview("default/basic_ref_zh.wav").await.unwrap();

    assert_ne!(first, second);
    let files = ctx.output_files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].to_string_lossy(), second);
    assert_eq!(
        std::fs::read(&second).unwrap(),
        helpers::mock_server::FAKE_WAV.to_vec()
    );
}

#[tokio::test]
#[serial]
async fn it_should_fetch_a_previewed_clip_once() {
    let ctx = TestContext::new().await.unwrap();

    ctx.references.preview("default/basic_ref_en.wav").await.unwrap();
    ctx.references.preview("default/basic_ref_en.wav").await.unwrap();

    assert_eq!(ctx.server.with_state(|s| s.fetched.len()), 1);
}

#[tokio::test]
#[serial]
async fn it_should_report_a_missing_clip() {
    let ctx = TestContext::new().await.unwrap();

    let err = ctx.references.preview("custom/ghost.wav").await.unwrap_err();

    match err {
        ReferenceAudioError::Gateway(e) => {
            assert_eq!(e.status(), Some(404));
            assert_eq!(e.to_string(), "Reference audio not found");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
#[serial]
async fn it_should_upload_sequentially_and_select_the_last_upload() {
    let ctx = TestContext::new().await.unwrap();
    let alice = ctx.fixtures.wav("alice.wav").unwrap();
    let bob = ctx.fixtures.wav("bob.wav").unwrap();

    let batch = ctx.ref_audio_controller.upload(&[alice, bob]).await.unwrap();

    assert_eq!(batch.result.succeeded, vec!["alice.wav", "bob.wav"]);
    assert!(batch.result.failed.is_empty());
    assert_eq!(batch.selected.as_deref(), Some("custom/bob.wav"));
    assert_eq!(
        ctx.server.with_state(|s| s.uploaded_refs.clone()),
        vec!["alice.wav", "bob.wav"]
    );
    assert_eq!(ctx.form.snapshot().ref_audio, "custom/bob.wav");
    assert!(ctx.references.catalog().contains("custom/alice.wav"));
}

#[tokio::test]
#[serial]
async fn it_should_keep_going_after_a_failed_upload() {
    let ctx = TestContext::new().await.unwrap();
    ctx.server.configure(|s| s.failing_uploads = vec!["bob.wav".to_string()]);
    let files = vec![
        ctx.fixtures.wav("alice.wav").unwrap(),
        ctx.fixtures.wav("bob.wav").unwrap(),
        ctx.fixtures.wav("carol.wav").unwrap(),
    ];

    let batch = ctx.ref_audio_controller.upload(&files).await.unwrap();

    assert_eq!(batch.result.succeeded, vec!["alice.wav", "carol.wav"]);
    assert_eq!(batch.result.failed.len(), 1);
    assert_eq!(batch.result.failed[0].filename, "bob.wav");
    assert_eq!(batch.result.failed[0].reason, "Failed to store reference audio");
    assert_eq!(batch.selected.as_deref(), Some("custom/carol.wav"));
}

#[tokio::test]
#[serial]
async fn it_should_reject_the_whole_batch_when_a_file_is_invalid() {
    let ctx = TestContext::new().await.unwrap();
    let files = vec![
        ctx.fixtures.sized_wav("a.wav", 60 * 1024 * 1024).unwrap(),
        ctx.fixtures.wav("b.wav").unwrap(),
        ctx.fixtures.write("notes.pdf", b"%PDF-1.4").unwrap(),
    ];

    let err = ctx.ref_audio_controller.upload(&files).await.unwrap_err();

    let AppError::ReferenceAudio(ReferenceAudioError::Upload(UploadError::Invalid(rejected))) = err else {
        panic!("expected a validation error, got {:?}", err);
    };
    let names: Vec<&str> = rejected.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["a.wav", "notes.pdf"]);
    assert!(ctx.server.with_state(|s| s.uploaded_refs.is_empty()));
}

#[tokio::test]
#[serial]
async fn it_should_fail_when_a_path_does_not_exist() {
    let ctx = TestContext::new().await.unwrap();

    let err = ctx
        .ref_audio_controller
        .upload(&[PathBuf::from("/definitely/not/here.wav")])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
#[serial]
async fn it_should_delete_custom_audio_and_fall_back() {
    let ctx = TestContext::new().await.unwrap();
    let clip = ctx.fixtures.wav("alice.wav").unwrap();
    ctx.ref_audio_controller.upload(&[clip]).await.unwrap();
    assert_eq!(ctx.references.selected().as_deref(), Some("custom/alice.wav"));

    let ack = ctx.ref_audio_controller.delete("custom/alice.wav").await.unwrap();

    assert_eq!(ack.status, "success");
    assert_eq!(ack.message, "Deleted alice.wav");
    assert_eq!(
        ctx.server.with_state(|s| s.deleted.clone()),
        vec!["custom/alice.wav"]
    );
    assert!(!ctx.references.catalog().contains("custom/alice.wav"));
    assert_eq!(ctx.references.selected().as_deref(), Some("default/basic_ref_en.wav"));
}

#[tokio::test]
#[serial]
async fn it_should_refuse_to_delete_default_audio_without_calling_the_server() {
    let ctx = TestContext::new().await.unwrap();

    let err = ctx
        .ref_audio_controller
        .delete("default/basic_ref_en.wav")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::ReferenceAudio(ReferenceAudioError::NotDeletable(_))
    ));
    assert!(ctx.server.with_state(|s| s.deleted.is_empty()));
}
