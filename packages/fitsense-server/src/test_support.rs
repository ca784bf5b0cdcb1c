use crate::db::initialize;
use crate::llm::{CompletionClient, LlmError};
use crate::services::generation::WorkoutGenerator;
use crate::state::AppState;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Completion client answering from a fixed script, recording prompts.
pub(crate) struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub(crate) fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete_json(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }
}

pub(crate) async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    initialize::initial(&db).await.unwrap();
    db
}

pub(crate) async fn test_state(replies: Vec<Result<String, LlmError>>) -> Arc<AppState> {
    Arc::new(AppState {
        db: memory_db().await,
        generator: WorkoutGenerator::new(Arc::new(ScriptedClient::new(replies))),
    })
}
