use super::*;
use crate::testing::{CODE_REVIEW_CONTENT, CountingCatalog, UnavailableCatalog, seeded_store};
use std::sync::atomic::Ordering;

fn tool_for(catalog: Arc<dyn SkillCatalog>) -> LoadSkillTool {
    LoadSkillTool::new(
        catalog,
        "default_agent",
        vec!["Code Review".to_string(), "Translation".to_string()],
    )
}

#[test]
fn test_definition() {
    let tool = tool_for(Arc::new(UnavailableCatalog));
    let def = tool.definition();
    assert_eq!(def.id, LOAD_SKILL_TOOL);
    let schema = def.parameters_schema.as_ref().unwrap();
    assert_eq!(schema["required"][0], "skill_name");
    assert_eq!(tool.persona_name(), "default_agent");
}

#[tokio::test]
async fn test_load_by_id() {
    let tool = tool_for(seeded_store().await);
    let result = tool
        .execute(serde_json::json!({"skill_name": "code_review"}), ToolContext::new("t1"))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(
        result.content,
        format!("Loaded skill: code_review\n\n{}", CODE_REVIEW_CONTENT)
    );
    assert_eq!(result.metadata.get("found"), Some(&serde_json::json!(true)));
    assert_eq!(result.metadata.get("skill_id"), Some(&serde_json::json!("code_review")));
}

#[tokio::test]
async fn test_load_by_name() {
    let tool = tool_for(seeded_store().await);
    let output = tool.load("Code Review").await.unwrap();
    assert!(output.starts_with("Loaded skill: Code Review\n\n"));
    assert!(output.ends_with(CODE_REVIEW_CONTENT));
}

#[tokio::test]
async fn test_miss_lists_catalog() {
    let tool = tool_for(seeded_store().await);
    let result = tool
        .execute(serde_json::json!({"skill_name": "nope"}), ToolContext::new("t1"))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(
        result.content,
        "Skill 'nope' not found. Available skills: Code Review, Translation"
    );
    assert_eq!(result.metadata.get("found"), Some(&serde_json::json!(false)));
    assert!(result.metadata.get("skill_id").is_none());
}

#[tokio::test]
async fn test_one_read_per_call() {
    let catalog = Arc::new(CountingCatalog::new(seeded_store().await));
    let tool = tool_for(catalog.clone());

    tool.load("code_review").await.unwrap();
    assert_eq!(catalog.reads(), 1);

    tool.load("nope").await.unwrap();
    assert_eq!(catalog.reads(), 2);
    assert_eq!(catalog.get_skill_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_idempotent() {
    let tool = tool_for(seeded_store().await);
    let first = tool.load("translation").await.unwrap();
    let second = tool.load("translation").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalid_params() {
    let tool = tool_for(seeded_store().await);
    let err = tool
        .execute(serde_json::json!({"name": "code_review"}), ToolContext::new("t1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidParameters(_)));
}

#[tokio::test]
async fn test_non_object_params_rejected_before_lookup() {
    let catalog = Arc::new(CountingCatalog::new(seeded_store().await));
    let tool = tool_for(catalog.clone());
    let err = tool
        .execute(serde_json::json!("code_review"), ToolContext::new("t1"))
        .await
        .unwrap_err();
    match err {
        ToolError::InvalidParameters(message) => assert!(message.contains("object")),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(catalog.reads(), 0);
}

#[tokio::test]
async fn test_store_failure_is_execution_error() {
    let tool = tool_for(Arc::new(UnavailableCatalog));
    let err = tool
        .execute(serde_json::json!({"skill_name": "code_review"}), ToolContext::new("t1"))
        .await
        .unwrap_err();
    match err {
        ToolError::ExecutionFailed(message) => assert!(message.contains("connection refused")),
        other => panic!("unexpected error: {:?}", other),
    }
}
