use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Question,
        dto::response::{QuizSession, SessionQuestion},
    },
    repositories::{QuestionRepository, QuizRepository},
};

/// Builds the student-facing view of a quiz: answer fields withheld,
/// question order freshly randomized on every call.
pub struct SessionService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl SessionService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { quizzes, questions }
    }

    /// Serves a session for a published quiz. Unpublished quizzes are
    /// indistinguishable from missing ones. Question ids that no longer
    /// resolve are dropped from the view. Read-only: no attempt record or
    /// server-side session state is created, so a reload simply deals a
    /// fresh order.
    pub async fn start_session(&self, quiz_id: &str) -> AppResult<QuizSession> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .filter(|quiz| quiz.published)
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let mut questions = self.questions.find_by_ids(&quiz.question_ids).await?;

        // Fisher-Yates via SliceRandom: every permutation equally likely.
        // Option order within a question stays as stored.
        questions.shuffle(&mut rand::thread_rng());

        Ok(QuizSession {
            quiz_id: quiz.id,
            title: quiz.title,
            category: quiz.category,
            time_limit_seconds: quiz.time_limit_seconds,
            questions: questions.into_iter().map(redact).collect(),
        })
    }
}

fn redact(question: Question) -> SessionQuestion {
    SessionQuestion {
        id: question.id,
        question_text: question.question_text,
        options: question.options,
    }
}
