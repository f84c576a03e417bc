use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scored answer inside an attempt. `correct_index` is copied from the
/// authoritative question record at scoring time so the attempt remains
/// meaningful even if the question is later edited or deleted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub selected_index: i32,
    pub correct_index: i32,
}

/// An immutable record of one scoring pass over one student's answers to one
/// quiz. Created exactly once per submission and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attempt {
    pub id: String,
    pub student_id: String,
    pub quiz_id: String,
    pub answers: Vec<AnswerRecord>,
    /// Percentage of attempted questions answered correctly, 0-100.
    pub score: i32,
    pub correct: i32,
    pub wrong: i32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl Attempt {
    pub fn new(
        student_id: &str,
        quiz_id: &str,
        answers: Vec<AnswerRecord>,
        score: i32,
        correct: i32,
        wrong: i32,
    ) -> Self {
        let now = Utc::now();
        Attempt {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            quiz_id: quiz_id.to_string(),
            answers,
            score,
            correct,
            wrong,
            started_at: now,
            completed_at: now,
        }
    }

    pub fn total(&self) -> i32 {
        self.correct + self.wrong
    }
}
