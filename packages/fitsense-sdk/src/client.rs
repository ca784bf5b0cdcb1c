use crate::SdkResult;
use crate::error::SdkError;
use fitsense_core::*;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone)]
pub struct FitsenseClient {
    client: Client,
    pub base_url: String,
    pub timeout: Duration,
}

impl FitsenseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            // generation waits on the LLM
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> SdkResult<Response> {
        let response = request.timeout(self.timeout).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        Err(decode_error(status, &body))
    }

    async fn data<T: DeserializeOwned>(&self, request: RequestBuilder) -> SdkResult<T> {
        let response = self.send(request).await?;
        let api_response: ApiResponse<T> = response.json().await?;
        Ok(api_response.data)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> SdkResult<T> {
        self.data(self.client.get(self.url(path))).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> SdkResult<T> {
        self.data(self.client.post(self.url(path)).json(body)).await
    }

    async fn delete_no_content(&self, path: &str) -> SdkResult<()> {
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    pub async fn health(&self) -> SdkResult<bool> {
        let response = self
            .client
            .get(self.url("/health"))
            .timeout(self.timeout)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// Sign up through the form endpoint and receive the first workout.
    pub async fn signup(&self, input: &SignupInput) -> SdkResult<SignupResponse> {
        self.data(self.client.post(self.url("/")).form(input)).await
    }

    pub async fn generate(&self, input: &GenerateInput) -> SdkResult<GenerateOutput> {
        self.post_json("/generate", input).await
    }

    pub async fn get_user(&self, user_id: Uuid) -> SdkResult<UserInfo> {
        self.get(&format!("/users/{user_id}")).await
    }

    pub async fn update_user(
        &self,
        user_id: Uuid,
        input: &UpdateUserInput,
    ) -> SdkResult<UpdateUserResponse> {
        self.data(self.client.put(self.url(&format!("/users/{user_id}"))).json(input))
            .await
    }

    pub async fn delete_user(&self, user_id: Uuid) -> SdkResult<()> {
        self.delete_no_content(&format!("/users/{user_id}")).await
    }

    pub async fn record_metric(&self, user_id: Uuid, input: &MetricInput) -> SdkResult<MetricItem> {
        self.post_json(&format!("/users/{user_id}/metrics"), input).await
    }

    pub async fn list_metrics(&self, user_id: Uuid) -> SdkResult<Vec<MetricItem>> {
        self.get(&format!("/users/{user_id}/metrics")).await
    }

    pub async fn latest_metric(&self, user_id: Uuid) -> SdkResult<MetricItem> {
        self.get(&format!("/users/{user_id}/metrics/latest")).await
    }

    pub async fn delete_metrics(&self, user_id: Uuid) -> SdkResult<DeletedCount> {
        self.data(self.client.delete(self.url(&format!("/users/{user_id}/metrics"))))
            .await
    }

    pub async fn generate_workout(
        &self,
        user_id: Uuid,
        request: &WorkoutRequest,
    ) -> SdkResult<GeneratedWorkout> {
        self.post_json(&format!("/users/{user_id}/workouts"), request).await
    }

    pub async fn list_workouts(&self, user_id: Uuid) -> SdkResult<Vec<WorkoutItem>> {
        self.get(&format!("/users/{user_id}/workouts")).await
    }

    pub async fn latest_workout(&self, user_id: Uuid) -> SdkResult<WorkoutItem> {
        self.get(&format!("/users/{user_id}/workouts/latest")).await
    }

    pub async fn delete_workouts(&self, user_id: Uuid) -> SdkResult<DeletedCount> {
        self.data(self.client.delete(self.url(&format!("/users/{user_id}/workouts"))))
            .await
    }

    pub async fn get_workout(&self, workout_id: Uuid) -> SdkResult<WorkoutItem> {
        self.get(&format!("/workouts/{workout_id}")).await
    }

    pub async fn complete_workout(&self, workout_id: Uuid) -> SdkResult<WorkoutItem> {
        self.data(self.client.post(self.url(&format!("/workouts/{workout_id}/complete"))))
            .await
    }

    pub async fn delete_workout(&self, workout_id: Uuid) -> SdkResult<()> {
        self.delete_no_content(&format!("/workouts/{workout_id}")).await
    }

    pub async fn create_exercise(&self, input: &ExerciseInput) -> SdkResult<ExerciseItem> {
        self.post_json("/exercises", input).await
    }

    pub async fn get_exercise(&self, name: &str) -> SdkResult<ExerciseItem> {
        let mut url = reqwest::Url::parse(&self.url("/exercises"))
            .map_err(|e| SdkError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SdkError::InvalidUrl(self.base_url.clone()))?
            .push(name);
        self.data(self.client.get(url)).await
    }
}

fn decode_error(status: StatusCode, body: &str) -> SdkError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => SdkError::ApiError {
            status: status.as_u16(),
            tag: error.tag,
            message: error.error,
        },
        Err(_) => SdkError::ApiError {
            status: status.as_u16(),
            tag: "unknown".to_string(),
            message: body.chars().take(200).collect(),
        },
    }
}
