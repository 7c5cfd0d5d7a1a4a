// End-to-end tests for TTS Studio
//
// Each test starts its own mock TTS server (axum on 127.0.0.1:0) and wires
// the real HTTP gateway, services and controllers against it. Generated and
// previewed audio lands in a temporary output directory per test.
//
// Tests are marked #[serial] so timing-sensitive cancellation scenarios do
// not compete for the runtime.

mod helpers;
mod test_ref_audio;
mod test_synthesis;
