use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Height bounds, in inches
pub const MIN_HEIGHT_INCHES: i32 = 25;
pub const MAX_HEIGHT_INCHES: i32 = 99;

/// Weight bounds, in pounds
pub const MIN_WEIGHT_POUNDS: f64 = 80.0;
pub const MAX_WEIGHT_POUNDS: f64 = 1000.0;

/// Body-composition goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    #[serde(rename = "Dirty Bulk")]
    DirtyBulk,
    #[serde(rename = "Lean Bulk")]
    LeanBulk,
    #[serde(rename = "Standard Cut")]
    StandardCut,
    #[serde(rename = "Aggressive Cut")]
    AggressiveCut,
    #[serde(rename = "Body Recomposition")]
    BodyRecomposition,
    #[serde(rename = "Maintain")]
    Maintain,
}

impl Plan {
    pub const ALL: [Plan; 6] = [
        Plan::DirtyBulk,
        Plan::LeanBulk,
        Plan::StandardCut,
        Plan::AggressiveCut,
        Plan::BodyRecomposition,
        Plan::Maintain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::DirtyBulk => "Dirty Bulk",
            Plan::LeanBulk => "Lean Bulk",
            Plan::StandardCut => "Standard Cut",
            Plan::AggressiveCut => "Aggressive Cut",
            Plan::BodyRecomposition => "Body Recomposition",
            Plan::Maintain => "Maintain",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Plan::ALL
            .into_iter()
            .find(|plan| plan.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownPlan(s.to_string()))
    }
}

/// Daily activity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "Sedentary")]
    Sedentary,
    #[serde(rename = "Lightly Active")]
    LightlyActive,
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "Extremely Active")]
    ExtremelyActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::Active,
        ActivityLevel::ExtremelyActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::Active => "Active",
            ActivityLevel::ExtremelyActive => "Extremely Active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownActivity(s.to_string()))
    }
}

/// Workout lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    Generated,
    Completed,
}

impl WorkoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStatus::Generated => "generated",
            WorkoutStatus::Completed => "completed",
        }
    }
}

/// Outcome of the optional second LLM pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Refinement {
    /// Only a draft was requested
    Skipped,
    Refined,
    /// The refinement call failed and the draft was kept
    RefinementFailed,
}

/// One validated exercise of a generated workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExercise {
    #[serde(rename = "Exercise")]
    pub exercise: String,
    #[serde(rename = "Sets")]
    pub sets: i64,
    #[serde(rename = "Rep Range")]
    pub rep_range: [i64; 2],
}

/// 用户信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: Uuid,
    pub username: Option<String>,
    pub has_password: bool,
    pub activity_level: ActivityLevel,
    pub plan: Plan,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricItem {
    pub metric_id: Uuid,
    pub user_id: Uuid,
    pub height: i32,
    pub weight: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutItem {
    pub workout_id: Uuid,
    pub user_id: Uuid,
    pub muscles_targeted: String,
    pub llm_prompt: String,
    pub llm_raw: String,
    pub workout_details: Vec<ParsedExercise>,
    pub date_generated: DateTime<Utc>,
    pub status: WorkoutStatus,
    pub completed_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseItem {
    pub exercise_id: Uuid,
    pub name: String,
    pub primary_muscle_group: Option<String>,
    pub secondary_muscle_group: Option<String>,
    pub equipment: String,
    pub difficulty: String,
    pub instructions: String,
    pub video_url: Option<String>,
    pub is_custom: bool,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Signup form, posted to `/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupInput {
    pub height: i32,
    pub weight: f64,
    pub plan: Plan,
    pub activity: ActivityLevel,
    /// Muscle groups to target
    pub workout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
    pub workout_id: Uuid,
    pub workout_details: Vec<ParsedExercise>,
}

/// Body of `/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateInput {
    pub height: i32,
    pub weight: f64,
    pub plan: String,
    pub activity: String,
    pub workout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub llm_response: String,
    pub llm_prompt: String,
}

/// Partial user update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub updated_fields: Vec<String>,
}

/// New metric reading; a missing field carries the last known value forward
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRequest {
    /// Muscle groups to target
    pub workout: String,
    #[serde(default)]
    pub refine: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedWorkout {
    pub workout: WorkoutItem,
    pub refinement: Refinement,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseInput {
    pub name: String,
    #[serde(default)]
    pub primary_muscle_group: Option<String>,
    #[serde(default)]
    pub secondary_muscle_group: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedCount {
    pub deleted_count: u64,
}

/// API 响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub tag: String,
}

/// Rejected input value
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    UnknownPlan(String),
    UnknownActivity(String),
    HeightOutOfRange(i32),
    WeightOutOfRange(f64),
    NotANumber { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownPlan(plan) => write!(
                f,
                "Invalid plan '{plan}', expected one of: {}",
                Plan::ALL.map(|p| p.as_str()).join(", ")
            ),
            ValidationError::UnknownActivity(level) => write!(
                f,
                "Invalid activity level '{level}', expected one of: {}",
                ActivityLevel::ALL.map(|a| a.as_str()).join(", ")
            ),
            ValidationError::HeightOutOfRange(height) => write!(
                f,
                "Unrealistic height {height}, expected {MIN_HEIGHT_INCHES}-{MAX_HEIGHT_INCHES} inches"
            ),
            ValidationError::WeightOutOfRange(weight) => write!(
                f,
                "Unrealistic weight {weight}, expected {MIN_WEIGHT_POUNDS}-{MAX_WEIGHT_POUNDS} pounds"
            ),
            ValidationError::NotANumber { field, value } => {
                write!(f, "{field} must be a number, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_height(height: i32) -> Result<i32, ValidationError> {
    if (MIN_HEIGHT_INCHES..=MAX_HEIGHT_INCHES).contains(&height) {
        Ok(height)
    } else {
        Err(ValidationError::HeightOutOfRange(height))
    }
}

pub fn validate_weight(weight: f64) -> Result<f64, ValidationError> {
    if weight.is_finite() && (MIN_WEIGHT_POUNDS..=MAX_WEIGHT_POUNDS).contains(&weight) {
        Ok(weight)
    } else {
        Err(ValidationError::WeightOutOfRange(weight))
    }
}

/// Parses and bounds-checks a height typed by a person or posted in a form
pub fn parse_height(text: &str) -> Result<i32, ValidationError> {
    let height = text
        .trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::NotANumber {
            field: "height",
            value: text.trim().to_string(),
        })?;
    validate_height(height)
}

pub fn parse_weight(text: &str) -> Result<f64, ValidationError> {
    let weight = text
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field: "weight",
            value: text.trim().to_string(),
        })?;
    validate_weight(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_round_trip() {
        for plan in Plan::ALL {
            assert_eq!(plan.as_str().parse::<Plan>().unwrap(), plan);
            let json = serde_json::to_string(&plan).unwrap();
            assert_eq!(json, format!("\"{}\"", plan.as_str()));
        }
    }

    #[test]
    fn test_activity_round_trip() {
        for level in ActivityLevel::ALL {
            assert_eq!(level.as_str().parse::<ActivityLevel>().unwrap(), level);
        }
        assert_eq!(
            " Lightly Active ".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::LightlyActive
        );
    }

    #[test]
    fn test_unknown_plan_rejected() {
        let err = "Bulk".parse::<Plan>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownPlan("Bulk".to_string()));
        assert!(err.to_string().contains("Lean Bulk"));
        assert!("lean bulk".parse::<Plan>().is_err());
    }

    #[test]
    fn test_parsed_exercise_wire_format() {
        let entry = ParsedExercise {
            exercise: "Squat".to_string(),
            sets: 3,
            rep_range: [8, 12],
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"Exercise": "Squat", "Sets": 3, "Rep Range": [8, 12]})
        );
    }

    #[test]
    fn test_workout_status_and_refinement_serialization() {
        assert_eq!(
            serde_json::to_string(&WorkoutStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&Refinement::RefinementFailed).unwrap(),
            "\"refinement_failed\""
        );
    }

    #[test]
    fn test_height_bounds() {
        assert_eq!(validate_height(25), Ok(25));
        assert_eq!(validate_height(99), Ok(99));
        assert!(validate_height(24).is_err());
        assert!(validate_height(100).is_err());
        assert_eq!(parse_height(" 70 "), Ok(70));
        assert!(matches!(
            parse_height("seventy"),
            Err(ValidationError::NotANumber { field: "height", .. })
        ));
    }

    #[test]
    fn test_weight_bounds() {
        assert_eq!(parse_weight("180.5"), Ok(180.5));
        assert!(parse_weight("79.9").is_err());
        assert!(parse_weight("1000.1").is_err());
        assert!(parse_weight("NaN").is_err());
    }

    #[test]
    fn test_update_input_skips_absent_fields() {
        let input = UpdateUserInput {
            plan: Some("Maintain".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({"plan": "Maintain"}));
    }
}
