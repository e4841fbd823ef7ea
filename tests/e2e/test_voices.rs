use crate::helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_the_stock_catalog(ctx: &TestContext) {
    let response = ctx.client.get("/voices").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("total").and_then(|v| v.as_u64()), Some(4));

    let voices = body.get("voices").and_then(|v| v.as_array()).unwrap();
    let ids: Vec<&str> = voices
        .iter()
        .filter_map(|v| v.get("voice_id").and_then(|id| id.as_str()))
        .collect();
    assert_eq!(ids, vec!["female", "male", "female_us", "male_us"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_describe_each_voice(ctx: &TestContext) {
    let response = ctx.client.get("/voices").await.unwrap();
    let body = response.body.as_ref().unwrap();

    for voice in body.get("voices").and_then(|v| v.as_array()).unwrap() {
        assert!(voice.get("voice_id").and_then(|v| v.as_str()).is_some());
        assert!(voice.get("name").and_then(|v| v.as_str()).is_some());
        assert!(voice.get("language").and_then(|v| v.as_str()).is_some());
        assert!(voice.get("gender").and_then(|v| v.as_str()).is_some());
        assert!(voice.get("description").and_then(|v| v.as_str()).is_some());
    }
}
