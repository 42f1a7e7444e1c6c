use std::sync::Arc;
use std::time::Duration;

use dev_radar::error::RadarError;
use dev_radar::llm::openai::OpenAiChatClient;
use dev_radar::pipeline::IngestionPipeline;
use dev_radar::store::{ MemoryScanStore, ScanStore };

fn pipeline_against(server: &mockito::Server) -> (IngestionPipeline, Arc<MemoryScanStore>) {
    let client = OpenAiChatClient::new(
        "fake-api-key".to_string(),
        "gpt-4o".to_string(),
        format!("{}/v1/chat/completions", server.url()),
        0.7,
    )
    .unwrap();

    let store = Arc::new(MemoryScanStore::new());
    let pipeline = IngestionPipeline::new(
        Arc::new(client),
        store.clone(),
        4000,
        Duration::from_secs(10),
    );
    (pipeline, store)
}

fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn full_run_against_mock_upstream_persists_one_record() {
    let mut server = mockito::Server::new_async().await;

    let scanner_json = r#"```json
{
    "run_metadata": {"generated_at_utc": "2025-01-01T00:00:00Z", "time_window_focus": "last 24-72 hours"},
    "coding_tools_and_workflows": [],
    "ml_learning_resources": [{
        "title": "Course", "level": "beginner", "format": "course",
        "summary": "s", "what_you_learn": "w", "link": "l", "tags": ["ml-learning"]
    }],
    "ai_models_and_platforms": [],
    "notable_trends_or_patterns": []
}
```"#;

    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(scanner_json))
        .create_async()
        .await;

    let (pipeline, store) = pipeline_against(&server);

    let summary = pipeline.run("Scan").await.unwrap();
    assert_eq!(summary.stats.ml_resources, 1);
    assert_eq!(summary.stats.coding_tools, 0);

    let latest = store.select_latest().await.unwrap().unwrap();
    assert_eq!(latest.id, summary.result_id);
    assert_eq!(latest.ml_resources[0].title, "Course");

    mock.assert_async().await;
}

#[tokio::test]
async fn non_json_model_text_fails_without_inserting() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Here is what I found today: nothing much."))
        .create_async()
        .await;

    let (pipeline, store) = pipeline_against(&server);

    let err = pipeline.run("Scan").await.unwrap_err();
    assert!(matches!(err, RadarError::Parse { .. }));
    assert!(store.select_latest().await.unwrap().is_none());
}

#[tokio::test]
async fn upstream_http_failure_aborts_the_run() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let (pipeline, store) = pipeline_against(&server);

    let err = pipeline.run("Scan").await.unwrap_err();
    assert!(matches!(err, RadarError::Upstream(_)));
    assert!(store.select_latest().await.unwrap().is_none());
}
