use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::{
            request::{CreateQuizRequest, UpdateQuizRequest},
            response::QuizSummary,
        },
    },
    repositories::QuizRepository,
};

/// Teacher-scoped quiz CRUD plus the student-facing catalog reads.
pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { quizzes }
    }

    /// Question references are accepted as given; ids that stop resolving
    /// later are filtered at read time rather than rejected here.
    pub async fn create_quiz(
        &self,
        request: CreateQuizRequest,
        teacher_id: &str,
    ) -> AppResult<Quiz> {
        request.validate()?;

        let quiz = Quiz::new(
            &request.title,
            teacher_id,
            &request.category,
            request.question_ids,
            request.time_limit_seconds,
            request.published,
        );

        self.quizzes.create(quiz).await
    }

    pub async fn list_for_teacher(&self, teacher_id: &str) -> AppResult<Vec<Quiz>> {
        self.quizzes.find_by_teacher(teacher_id).await
    }

    pub async fn update_quiz(
        &self,
        id: &str,
        teacher_id: &str,
        request: UpdateQuizRequest,
    ) -> AppResult<Quiz> {
        request.validate()?;

        let mut quiz = self
            .quizzes
            .find_by_id(id)
            .await?
            .filter(|quiz| quiz.teacher_id == teacher_id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        if let Some(title) = request.title {
            quiz.title = title;
        }
        if let Some(category) = request.category {
            quiz.category = category;
        }
        if let Some(question_ids) = request.question_ids {
            quiz.question_ids = question_ids;
        }
        if let Some(time_limit_seconds) = request.time_limit_seconds {
            quiz.time_limit_seconds = time_limit_seconds;
        }
        if let Some(published) = request.published {
            quiz.published = published;
        }

        self.quizzes.update_owned(quiz).await
    }

    pub async fn delete_quiz(&self, id: &str, teacher_id: &str) -> AppResult<()> {
        self.quizzes.delete_owned(id, teacher_id).await
    }

    /// Published quizzes only, with question ids withheld.
    pub async fn list_available(&self) -> AppResult<Vec<QuizSummary>> {
        let quizzes = self.quizzes.find_published(None).await?;
        Ok(quizzes.into_iter().map(QuizSummary::from).collect())
    }

    /// A single published quiz summary. Unpublished quizzes are
    /// indistinguishable from missing ones for students.
    pub async fn get_available(&self, id: &str) -> AppResult<QuizSummary> {
        let quiz = self
            .quizzes
            .find_by_id(id)
            .await?
            .filter(|quiz| quiz.published)
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(QuizSummary::from(quiz))
    }

    /// Distinct category labels among published quizzes.
    pub async fn categories(&self) -> AppResult<Vec<String>> {
        self.quizzes.distinct_categories().await
    }
}
