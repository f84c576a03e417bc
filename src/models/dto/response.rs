use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Quiz, User, UserRole};

/// A question as served to a student inside a session. The type carries no
/// `correct_index` or `explanation` at all, so the answer key cannot leak
/// through any serialization of the session view.
#[derive(Debug, Clone, Serialize)]
pub struct SessionQuestion {
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
}

/// The answer-redacted projection of a quiz served to a student on session
/// start. Question order is freshly randomized per call.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSession {
    pub quiz_id: String,
    pub title: String,
    pub category: String,
    pub time_limit_seconds: i64,
    pub questions: Vec<SessionQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttemptResult {
    pub attempt_id: String,
    pub score: i32,
    pub correct: i32,
    pub wrong: i32,
    pub total: i32,
}

/// A personal-history row annotated with quiz metadata. Annotations are
/// `None` when the referenced quiz no longer resolves.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryView {
    pub quiz_title: Option<String>,
    pub category: Option<String>,
    pub score: i32,
    pub correct: i32,
    pub wrong: i32,
    pub total: i32,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub student_name: Option<String>,
    pub quiz_title: Option<String>,
    pub category: Option<String>,
    pub score: i32,
    pub correct: i32,
    pub wrong: i32,
}

/// Student-facing quiz listing: question ids are withheld so the catalog
/// reveals only the size of the quiz, not its contents.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub time_limit_seconds: i64,
    pub question_count: usize,
}

impl From<Quiz> for QuizSummary {
    fn from(quiz: Quiz) -> Self {
        QuizSummary {
            id: quiz.id,
            title: quiz.title,
            category: quiz.category,
            time_limit_seconds: quiz.time_limit_seconds,
            question_count: quiz.question_ids.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratedQuestionsResponse {
    pub message: String,
    pub count: usize,
    pub questions: Vec<crate::models::domain::Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_question_serializes_only_public_fields() {
        let question = SessionQuestion {
            id: "q-1".to_string(),
            question_text: "Capital of France?".to_string(),
            options: vec![
                "Paris".to_string(),
                "London".to_string(),
                "Berlin".to_string(),
                "Madrid".to_string(),
            ],
        };

        let value = serde_json::to_value(&question).expect("question should serialize");
        let keys: Vec<&str> = value
            .as_object()
            .expect("should be an object")
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(keys, vec!["id", "question_text", "options"]);
    }

    #[test]
    fn quiz_session_serialization_never_contains_answer_fields() {
        let session = QuizSession {
            quiz_id: "quiz-1".to_string(),
            title: "Geography".to_string(),
            category: "geography".to_string(),
            time_limit_seconds: 300,
            questions: vec![SessionQuestion {
                id: "q-1".to_string(),
                question_text: "Capital of France?".to_string(),
                options: vec!["Paris".to_string(); 4],
            }],
        };

        let json = serde_json::to_string(&session).expect("session should serialize");
        assert!(!json.contains("correct_index"));
        assert!(!json.contains("explanation"));
    }

    #[test]
    fn quiz_summary_withholds_question_ids() {
        let quiz = Quiz::new(
            "Geography",
            "teacher-1",
            "geography",
            vec!["q-1".to_string(), "q-2".to_string(), "q-3".to_string()],
            300,
            true,
        );

        let summary = QuizSummary::from(quiz);
        assert_eq!(summary.question_count, 3);

        let json = serde_json::to_string(&summary).expect("summary should serialize");
        assert!(!json.contains("question_ids"));
        assert!(!json.contains("q-1"));
    }

    #[test]
    fn user_view_omits_password_hash() {
        let user = User::new("Ada", "ada@example.com", "super-secret-hash", UserRole::Student);
        let view = UserView::from(user);

        let json = serde_json::to_string(&view).expect("view should serialize");
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("super-secret-hash"));
    }
}
