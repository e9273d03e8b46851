//! Shared fixtures for the crate's tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use skillvault_protocols::{
    CompletionRequest, CompletionResponse, LLMProvider, Message, NewPersona, Persona,
    ProviderError, Skill, SkillCatalog, SkillImport, SkillManifest, SkillSummary, StopReason,
    StoreError, Usage,
};
use skillvault_store_sqlite::SqliteSkillStore;

pub(crate) const CODE_REVIEW_CONTENT: &str =
    "# Code Review\n\n1. Read the diff.\n2. Flag bugs first, style second.";

/// Store with `default_agent` owning "Code Review" and "Translation".
pub(crate) async fn seeded_store() -> Arc<SqliteSkillStore> {
    let store = SqliteSkillStore::in_memory().await.unwrap();
    store
        .add_persona(NewPersona::new("default_agent").with_description("Default persona"))
        .await
        .unwrap();

    let code_review = SkillManifest::new("code_review", "Code Review")
        .with_short_description("Reviews code for bugs and style")
        .with_description("Detailed code review covering correctness, security and style")
        .with_priority(10);
    store
        .import_skill("default_agent", SkillImport::new(code_review, CODE_REVIEW_CONTENT))
        .await
        .unwrap();

    let translation = SkillManifest::new("translation", "Translation")
        .with_description("Translates documents between languages");
    store
        .import_skill("default_agent", SkillImport::new(translation, "# Translation"))
        .await
        .unwrap();

    Arc::new(store)
}

/// Catalog wrapper counting store reads.
pub(crate) struct CountingCatalog {
    inner: Arc<SqliteSkillStore>,
    pub(crate) get_skill_calls: AtomicUsize,
    pub(crate) list_calls: AtomicUsize,
}

impl CountingCatalog {
    pub(crate) fn new(inner: Arc<SqliteSkillStore>) -> Self {
        Self {
            inner,
            get_skill_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn reads(&self) -> usize {
        self.get_skill_calls.load(Ordering::SeqCst) + self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SkillCatalog for CountingCatalog {
    async fn get_persona(&self, name: &str) -> Result<Option<Persona>, StoreError> {
        self.inner.get_persona(name).await
    }

    async fn list_skills(&self, persona_name: &str) -> Result<Vec<SkillSummary>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_skills(persona_name).await
    }

    async fn get_skill(
        &self,
        persona_name: &str,
        identifier: &str,
    ) -> Result<Option<Skill>, StoreError> {
        self.get_skill_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_skill(persona_name, identifier).await
    }
}

/// Catalog whose store is unreachable.
pub(crate) struct UnavailableCatalog;

#[async_trait]
impl SkillCatalog for UnavailableCatalog {
    async fn get_persona(&self, _name: &str) -> Result<Option<Persona>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list_skills(&self, _persona_name: &str) -> Result<Vec<SkillSummary>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get_skill(
        &self,
        _persona_name: &str,
        _identifier: &str,
    ) -> Result<Option<Skill>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// Model provider that records requests and answers with a fixed reply.
pub(crate) struct RecordingProvider {
    pub(crate) requests: Mutex<Vec<CompletionRequest>>,
    fail: bool,
}

impl RecordingProvider {
    pub(crate) fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn last_request(&self) -> CompletionRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl LLMProvider for RecordingProvider {
    fn id(&self) -> &str {
        "recording"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);
        if self.fail {
            return Err(ProviderError::Timeout(30));
        }
        Ok(CompletionResponse {
            id: "resp-1".to_string(),
            model,
            message: Message::assistant("ok"),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
            metadata: Default::default(),
        })
    }
}
