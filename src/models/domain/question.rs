use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question owned by the teacher who created it.
/// `correct_index` always points into `options`; creation paths validate
/// the range before a record is persisted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub teacher_id: String,
    /// Originating document name, or "manual-text" for text-pasted batches.
    pub source: String,
    pub category: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_index: i32,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(
        teacher_id: &str,
        source: &str,
        category: &str,
        question_text: &str,
        options: Vec<String>,
        correct_index: i32,
        explanation: &str,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            teacher_id: teacher_id.to_string(),
            source: source.to_string(),
            category: category.to_string(),
            question_text: question_text.to_string(),
            options,
            correct_index,
            explanation: explanation.to_string(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn has_valid_correct_index(&self) -> bool {
        self.correct_index >= 0 && (self.correct_index as usize) < self.options.len()
    }
}
