use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerRecord, Attempt, HistoryEntry, Question},
        dto::{request::SubmittedAnswer, response::AttemptResult},
    },
    repositories::{AttemptRepository, QuestionRepository, QuizRepository, UserRepository},
};

/// Scores submissions against the server-held answer key. The client's
/// payload carries only question ids and selected indices; correctness is
/// decided exclusively by re-fetching the question records.
pub struct ScoringService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    attempts: Arc<dyn AttemptRepository>,
    users: Arc<dyn UserRepository>,
}

/// Outcome of grading one submission before persistence.
pub struct GradedSubmission {
    pub records: Vec<AnswerRecord>,
    pub correct: i32,
    pub wrong: i32,
}

impl ScoringService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        attempts: Arc<dyn AttemptRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            attempts,
            users,
        }
    }

    /// Scores a submission and records it. The quiz is looked up regardless
    /// of its published flag: unpublishing a quiz mid-attempt must not strand
    /// the student. Persists the Attempt, then the history entry; the two
    /// writes are not transactional, and a failure of either surfaces to the
    /// caller.
    pub async fn submit(
        &self,
        quiz_id: &str,
        student_id: &str,
        answers: &[SubmittedAnswer],
    ) -> AppResult<AttemptResult> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let question_set = self.questions.find_by_ids(&quiz.question_ids).await?;

        let graded = grade(&question_set, answers);
        let score = percentage_score(graded.correct, graded.wrong);
        let total = graded.correct + graded.wrong;

        let attempt = Attempt::new(
            student_id,
            &quiz.id,
            graded.records,
            score,
            graded.correct,
            graded.wrong,
        );
        let attempt = self.attempts.create(attempt).await?;

        self.users
            .push_history(
                student_id,
                HistoryEntry {
                    quiz_id: quiz.id.clone(),
                    score,
                    correct: graded.correct,
                    wrong: graded.wrong,
                    total,
                    date: Utc::now(),
                },
            )
            .await?;

        Ok(AttemptResult {
            attempt_id: attempt.id,
            score,
            correct: graded.correct,
            wrong: graded.wrong,
            total,
        })
    }
}

/// Classifies each submitted answer against the authoritative question set.
/// Answers referencing questions outside the set are discarded without
/// counting toward either tally. A selected index outside the option range is
/// an ordinary wrong answer, not invalid input.
pub fn grade(questions: &[Question], answers: &[SubmittedAnswer]) -> GradedSubmission {
    let key: HashMap<&str, &Question> = questions
        .iter()
        .map(|question| (question.id.as_str(), question))
        .collect();

    let mut correct = 0;
    let mut wrong = 0;
    let mut records = Vec::new();

    for answer in answers {
        let Some(question) = key.get(answer.question_id.as_str()) else {
            continue;
        };

        if answer.selected_index == question.correct_index {
            correct += 1;
        } else {
            wrong += 1;
        }

        records.push(AnswerRecord {
            question_id: answer.question_id.clone(),
            selected_index: answer.selected_index,
            correct_index: question.correct_index,
        });
    }

    GradedSubmission {
        records,
        correct,
        wrong,
    }
}

/// Percentage of attempted questions answered correctly, rounded to the
/// nearest integer. An attempt with no gradeable answers scores 0; that is a
/// degenerate but valid attempt, not an error.
pub fn percentage_score(correct: i32, wrong: i32) -> i32 {
    let total = correct + wrong;
    if total == 0 {
        return 0;
    }

    (f64::from(correct) * 100.0 / f64::from(total)).round() as i32
}
