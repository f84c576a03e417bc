use once_cell::sync::Lazy;
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::UserRole;

static CATEGORY_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _\-]*$")
        .expect("CATEGORY_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 50, max = 20000))]
    pub text: String,

    #[validate(
        length(min = 1, max = 60),
        regex(path = *CATEGORY_REGEX, message = "Category must be alphanumeric")
    )]
    pub category: String,

    #[validate(range(min = 1, max = 50))]
    pub question_count: Option<u8>,
}

impl GenerateQuestionsRequest {
    pub fn question_count(&self) -> u8 {
        self.question_count.unwrap_or(10)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 2000))]
    pub question_text: Option<String>,

    #[validate(length(equal = 4, message = "Exactly 4 options are required"))]
    pub options: Option<Vec<String>>,

    #[validate(range(min = 0, max = 3))]
    pub correct_index: Option<i32>,

    #[validate(length(max = 2000))]
    pub explanation: Option<String>,

    #[validate(length(min = 1, max = 60))]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(
        length(min = 1, max = 60),
        regex(path = *CATEGORY_REGEX, message = "Category must be alphanumeric")
    )]
    pub category: String,

    #[validate(length(min = 1, message = "At least one question is required"))]
    pub question_ids: Vec<String>,

    #[validate(range(min = 10, max = 14400))]
    pub time_limit_seconds: i64,

    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 60))]
    pub category: Option<String>,

    #[validate(length(min = 1, message = "At least one question is required"))]
    pub question_ids: Option<Vec<String>>,

    #[validate(range(min = 10, max = 14400))]
    pub time_limit_seconds: Option<i64>,

    pub published: Option<bool>,
}

/// One answer as claimed by the client. `selected_index` is intentionally not
/// range-validated: an out-of-range selection is scored as wrong, not rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub selected_index: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardQuery {
    pub category: Option<String>,
}
