use super::*;
use crate::catalog::LOAD_SKILL_INSTRUCTION;
use crate::testing::{CODE_REVIEW_CONTENT, RecordingProvider, UnavailableCatalog, seeded_store};
use skillvault_protocols::{NewPersona, ProviderError, ToolContext};
use skillvault_store_sqlite::SqliteSkillStore;

#[tokio::test]
async fn test_build_uses_default_prompt() {
    let agent = SkillAgent::build(seeded_store().await, "default_agent", ModelSettings::default())
        .await
        .unwrap();

    assert_eq!(agent.persona().name, "default_agent");
    assert_eq!(agent.system_prompt(), DEFAULT_SYSTEM_PROMPT);
    assert_eq!(agent.tools().len(), 1);
}

#[tokio::test]
async fn test_build_uses_custom_prompt() {
    let store = SqliteSkillStore::in_memory().await.unwrap();
    store
        .add_persona(NewPersona::new("reviewer").with_system_prompt("You only review Rust."))
        .await
        .unwrap();

    let agent = SkillAgent::build(Arc::new(store), "reviewer", ModelSettings::default())
        .await
        .unwrap();
    assert_eq!(agent.system_prompt(), "You only review Rust.");
}

#[tokio::test]
async fn test_build_missing_persona() {
    let store = SqliteSkillStore::in_memory().await.unwrap();
    let err = SkillAgent::build(Arc::new(store), "ghost", ModelSettings::default())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, AgentError::PersonaNotFound(ref name) if name == "ghost"));
    assert!(err.to_string().contains("skillvault init"));
}

#[tokio::test]
async fn test_build_store_unavailable() {
    let err = SkillAgent::build(Arc::new(UnavailableCatalog), "default_agent", ModelSettings::default())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, AgentError::Store(StoreError::Unavailable(_))));
}

#[tokio::test]
async fn test_request_carries_settings() {
    let settings = ModelSettings {
        model: "gpt-4o-mini".to_string(),
        temperature: 0.2,
        max_tokens: Some(1024),
    };
    let agent = SkillAgent::build(seeded_store().await, "default_agent", settings)
        .await
        .unwrap();

    let request = agent.request(vec![Message::user("hi")]);
    assert_eq!(request.model, "gpt-4o-mini");
    assert_eq!(request.temperature, Some(0.2));
    assert_eq!(request.max_tokens, Some(1024));
    assert_eq!(request.system.as_deref(), Some(DEFAULT_SYSTEM_PROMPT));
}

#[tokio::test]
async fn test_end_to_end_turn() {
    let agent = SkillAgent::build(seeded_store().await, "default_agent", ModelSettings::default())
        .await
        .unwrap();
    let recorder = Arc::new(RecordingProvider::new());
    let provider = agent.provider(recorder.clone());
    assert_eq!(provider.id(), "recording");

    let response = provider
        .complete(agent.request(vec![Message::user("Please review my patch")]))
        .await
        .unwrap();
    assert_eq!(response.message.content, "ok");

    let sent = recorder.last_request();
    let system = sent.system.clone().unwrap();
    assert!(system.starts_with(DEFAULT_SYSTEM_PROMPT));
    assert!(
        system
            .lines()
            .any(|line| line == "- **Code Review**: Reviews code for bugs and style")
    );
    assert!(system.ends_with(LOAD_SKILL_INSTRUCTION));
    assert_eq!(system, agent.effective_system_prompt());
    assert!(sent.has_tool("load_skill"));

    let tool = &agent.tools()[0];
    let hit = tool
        .execute(serde_json::json!({"skill_name": "code_review"}), ToolContext::new("t1"))
        .await
        .unwrap();
    assert!(hit.content.starts_with("Loaded skill: code_review\n\n"));
    assert!(hit.content.ends_with(CODE_REVIEW_CONTENT));

    let miss = tool
        .execute(serde_json::json!({"skill_name": "nope"}), ToolContext::new("t1"))
        .await
        .unwrap();
    assert!(miss.content.contains("not found"));
    assert!(miss.content.contains("Code Review"));
}

#[tokio::test]
async fn test_provider_failure_propagates() {
    let agent = SkillAgent::build(seeded_store().await, "default_agent", ModelSettings::default())
        .await
        .unwrap();
    let recorder = Arc::new(RecordingProvider::failing());
    let provider = agent.provider(recorder.clone());

    let err = provider
        .complete(agent.request(vec![Message::user("hi")]))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Timeout(30)));
    assert_eq!(recorder.requests.lock().unwrap().len(), 1);
}
