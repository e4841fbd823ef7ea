use crate::helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_isolate_failures_and_preserve_input_order(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/tts/batch",
            &json!([
                { "text": "Selamat pagi" },
                { "text": "ini akan gagal", "voice": "narrator" },
                { "text": "Selamat malam" }
            ]),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("total").and_then(|v| v.as_u64()), Some(3));
    assert_eq!(body.get("succeeded").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(body.get("failed").and_then(|v| v.as_u64()), Some(1));

    let results = body.get("results").and_then(|v| v.as_array()).unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0].get("success").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(
        results[1].get("success").and_then(|v| v.as_bool()),
        Some(false)
    );
    assert_eq!(
        results[1].get("code").and_then(|v| v.as_str()),
        Some("unknown_voice")
    );
    assert_eq!(results[2].get("success").and_then(|v| v.as_bool()), Some(true));

    // Entries echo their source text in input order
    assert_eq!(
        results[0].get("text_preview").and_then(|v| v.as_str()),
        Some("Selamat pagi")
    );
    assert_eq!(
        results[2].get("text_preview").and_then(|v| v.as_str()),
        Some("Selamat malam")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_download_every_successful_batch_item(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/tts/batch",
            &json!([
                { "text": "satu" },
                { "text": "dua", "voice": "male" }
            ]),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let results = response
        .body
        .as_ref()
        .unwrap()
        .get("results")
        .and_then(|v| v.as_array())
        .unwrap()
        .clone();

    for entry in &results {
        let audio_url = entry.get("audio_url").and_then(|v| v.as_str()).unwrap();
        let audio = ctx.client.get(audio_url).await.unwrap();
        audio.assert_status(StatusCode::OK);
        assert!(!audio.body_bytes.is_empty());
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_batch_over_the_configured_maximum(ctx: &TestContext) {
    let items: Vec<_> = (0..ctx.config.max_batch_size + 1)
        .map(|i| json!({ "text": format!("item {}", i) }))
        .collect();

    let response = ctx.client.post("/tts/batch", &items).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("invalid_request");

    // Fail-fast: no artifact was produced for any item
    assert_eq!(ctx.store.usage().0, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_an_empty_batch(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts/batch", &json!([]))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("invalid_request");
}
