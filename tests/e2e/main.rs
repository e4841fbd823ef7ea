// End-to-end integration tests for the VoiceTape backend API
//
// Each test boots the full axum application on an ephemeral port with the
// deterministic fake synthesis engine and a per-test temporary output
// directory, so tests run in parallel without sharing any state and without
// reaching a real synthesis engine.

mod test_audio;
mod test_batch;
mod test_health;
mod test_stats;
mod test_voices;
