use crate::helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;
use uuid::Uuid;

async fn synthesize(ctx: &TestContext, text: &str) -> String {
    let response = ctx
        .client
        .post("/tts", &json!({ "text": text }))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    response
        .body
        .as_ref()
        .unwrap()
        .get("audio_url")
        .and_then(|v| v.as_str())
        .unwrap()
        .to_string()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_identical_bytes_on_repeated_downloads(ctx: &TestContext) {
    let audio_url = synthesize(ctx, "halo dunia").await;

    let first = ctx.client.get(&audio_url).await.unwrap();
    let second = ctx.client.get(&audio_url).await.unwrap();

    first.assert_status(StatusCode::OK);
    second.assert_status(StatusCode::OK);
    assert_eq!(first.body_bytes, second.body_bytes);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_a_download_filename(ctx: &TestContext) {
    let audio_url = synthesize(ctx, "halo").await;

    let response = ctx.client.get(&audio_url).await.unwrap();
    response.assert_status(StatusCode::OK);

    let disposition = response.header("content-disposition").unwrap();
    assert!(disposition.contains(".wav"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_an_unknown_id(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/audio/{}", Uuid::new_v4()))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_code("not_found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_a_malformed_id(ctx: &TestContext) {
    let response = ctx.client.get("/audio/not-a-uuid").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_code("not_found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_after_explicit_removal(ctx: &TestContext) {
    let audio_url = synthesize(ctx, "akan dihapus").await;
    let id: Uuid = audio_url.rsplit('/').next().unwrap().parse().unwrap();

    assert!(ctx.store.remove(id).await);

    let response = ctx.client.get(&audio_url).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}
