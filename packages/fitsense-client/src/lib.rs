pub mod format;
pub mod prompt;

use anyhow::{Result, anyhow};
use fitsense_core::*;
use fitsense_sdk::FitsenseClient;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub use format::*;

/// 共享的客户端状态管理
#[derive(Clone)]
pub struct ClientState {
    pub client: FitsenseClient,
    pub current_user: Arc<Mutex<Option<Uuid>>>,
}

impl ClientState {
    pub fn new(server_url: &str) -> Self {
        Self {
            client: FitsenseClient::new(server_url),
            current_user: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_user(server_url: &str, user_id: Uuid) -> Self {
        let state = Self::new(server_url);
        state.set_user(user_id);
        state
    }

    pub fn set_user(&self, user_id: Uuid) {
        if let Ok(mut guard) = self.current_user.lock() {
            *guard = Some(user_id);
        }
    }

    pub fn clear_user(&self) {
        if let Ok(mut guard) = self.current_user.lock() {
            *guard = None;
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.current_user.lock().ok().and_then(|guard| *guard)
    }

    fn require_user(&self) -> Result<Uuid> {
        self.user_id()
            .ok_or_else(|| anyhow!("no active user; sign up or pass --user first"))
    }

    /// Sign up and remember the new user for the rest of the session.
    pub async fn signup(&self, input: &SignupInput) -> Result<SignupResponse> {
        let response = self.client.signup(input).await?;
        self.set_user(response.user_id);
        Ok(response)
    }

    pub async fn profile(&self) -> Result<UserInfo> {
        Ok(self.client.get_user(self.require_user()?).await?)
    }

    pub async fn log_metric(&self, height: Option<i32>, weight: Option<f64>) -> Result<MetricItem> {
        let user_id = self.require_user()?;
        Ok(self
            .client
            .record_metric(user_id, &MetricInput { height, weight })
            .await?)
    }

    pub async fn generate_workout(&self, muscles: &str, refine: bool) -> Result<GeneratedWorkout> {
        let user_id = self.require_user()?;
        let request = WorkoutRequest {
            workout: muscles.to_string(),
            refine,
        };
        Ok(self.client.generate_workout(user_id, &request).await?)
    }

    pub async fn workouts(&self) -> Result<Vec<WorkoutItem>> {
        Ok(self.client.list_workouts(self.require_user()?).await?)
    }

    pub async fn complete_workout(&self, workout_id: Uuid) -> Result<WorkoutItem> {
        Ok(self.client.complete_workout(workout_id).await?)
    }

    /// Delete the active user and end the session.
    pub async fn delete_account(&self) -> Result<()> {
        let user_id = self.require_user()?;
        self.client.delete_user(user_id).await?;
        self.clear_user();
        Ok(())
    }
}

/// 健康检查
pub async fn health_check(state: &ClientState) -> Result<bool> {
    match state.client.health().await {
        Ok(healthy) => Ok(healthy),
        Err(_) => Ok(false),
    }
}
