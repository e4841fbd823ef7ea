use crate::helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_counters_and_configured_limits(ctx: &TestContext) {
    let response = ctx.client.get("/stats").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("requests_total").and_then(|v| v.as_u64()), Some(0));
    assert_eq!(body.get("artifacts_stored").and_then(|v| v.as_u64()), Some(0));
    assert_eq!(body.get("voices_available").and_then(|v| v.as_u64()), Some(4));
    assert!(body.get("started_at").is_some());

    let limits = body.get("limits").expect("Missing limits");
    assert_eq!(
        limits.get("max_text_length").and_then(|v| v.as_u64()),
        Some(ctx.config.max_text_length as u64)
    );
    assert_eq!(
        limits.get("max_batch_size").and_then(|v| v.as_u64()),
        Some(ctx.config.max_batch_size as u64)
    );
    assert_eq!(
        limits.get("max_concurrency").and_then(|v| v.as_u64()),
        Some(ctx.config.max_concurrency as u64)
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_count_successes_and_failures(ctx: &TestContext) {
    ctx.client
        .post("/tts", &json!({ "text": "sukses" }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
    ctx.client
        .post("/tts", &json!({ "text": "gagal", "voice": "narrator" }))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST);

    let response = ctx.client.get("/stats").await.unwrap();
    let body = response.body.as_ref().unwrap();

    assert_eq!(body.get("requests_total").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(
        body.get("requests_succeeded").and_then(|v| v.as_u64()),
        Some(1)
    );
    assert_eq!(body.get("requests_failed").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(body.get("artifacts_stored").and_then(|v| v.as_u64()), Some(1));
    assert!(body.get("artifacts_bytes").and_then(|v| v.as_u64()).unwrap() > 0);
}
