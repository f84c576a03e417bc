use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Question,
        dto::request::{GenerateQuestionsRequest, UpdateQuestionRequest},
    },
    repositories::QuestionRepository,
    services::generation_service::QuestionGenerator,
};

/// Source label for questions generated from pasted text rather than an
/// uploaded document.
const MANUAL_SOURCE: &str = "manual-text";

/// Teacher-scoped question pool management plus AI-backed generation.
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    generator: Arc<dyn QuestionGenerator>,
}

impl QuestionService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        generator: Arc<dyn QuestionGenerator>,
    ) -> Self {
        Self {
            questions,
            generator,
        }
    }

    /// Generates questions from raw text and persists the batch under the
    /// calling teacher. Generator output that violates the option/answer
    /// invariants is rejected wholesale rather than stored half-broken.
    pub async fn generate_from_text(
        &self,
        request: GenerateQuestionsRequest,
        teacher_id: &str,
    ) -> AppResult<Vec<Question>> {
        request.validate()?;

        let generated = self
            .generator
            .generate(&request.text, &request.category, request.question_count())
            .await?;

        let questions: Vec<Question> = generated
            .into_iter()
            .map(|generated| {
                Question::new(
                    teacher_id,
                    MANUAL_SOURCE,
                    &request.category,
                    &generated.question_text,
                    generated.options,
                    generated.correct_index,
                    &generated.explanation,
                )
            })
            .collect();

        if let Some(bad) = questions.iter().find(|q| !q.has_valid_correct_index()) {
            return Err(AppError::InternalError(format!(
                "Generator produced an invalid answer index for question '{}'",
                bad.question_text
            )));
        }

        self.questions.insert_many(questions).await
    }

    pub async fn list_for_teacher(&self, teacher_id: &str) -> AppResult<Vec<Question>> {
        self.questions.find_by_teacher(teacher_id).await
    }

    pub async fn update_question(
        &self,
        id: &str,
        teacher_id: &str,
        request: UpdateQuestionRequest,
    ) -> AppResult<Question> {
        request.validate()?;

        let mut question = self
            .questions
            .find_owned(id, teacher_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))?;

        if let Some(question_text) = request.question_text {
            question.question_text = question_text;
        }
        if let Some(options) = request.options {
            question.options = options;
        }
        if let Some(correct_index) = request.correct_index {
            question.correct_index = correct_index;
        }
        if let Some(explanation) = request.explanation {
            question.explanation = explanation;
        }
        if let Some(category) = request.category {
            question.category = category;
        }

        if !question.has_valid_correct_index() {
            return Err(AppError::ValidationError(
                "correct_index must point at one of the options".to_string(),
            ));
        }

        self.questions.update_owned(question).await
    }

    pub async fn delete_question(&self, id: &str, teacher_id: &str) -> AppResult<()> {
        self.questions.delete_owned(id, teacher_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::question_repository::MockQuestionRepository;
    use crate::services::generation_service::{GeneratedQuestion, MockQuestionGenerator};

    fn generate_request() -> GenerateQuestionsRequest {
        GenerateQuestionsRequest {
            text: "x".repeat(200),
            category: "geography".to_string(),
            question_count: Some(2),
        }
    }

    fn generated(correct_index: i32) -> GeneratedQuestion {
        GeneratedQuestion {
            question_text: "Capital of France?".to_string(),
            options: vec![
                "Paris".to_string(),
                "London".to_string(),
                "Berlin".to_string(),
                "Madrid".to_string(),
            ],
            correct_index,
            explanation: "".to_string(),
        }
    }

    #[tokio::test]
    async fn generate_from_text_persists_batch_under_teacher() {
        let mut generator = MockQuestionGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _, _| Ok(vec![generated(0), generated(2)]));

        let mut questions = MockQuestionRepository::new();
        questions
            .expect_insert_many()
            .returning(|questions| Ok(questions));

        let service = QuestionService::new(Arc::new(questions), Arc::new(generator));
        let stored = service
            .generate_from_text(generate_request(), "teacher-1")
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|q| q.teacher_id == "teacher-1"));
        assert!(stored.iter().all(|q| q.source == "manual-text"));
        assert!(stored.iter().all(|q| q.category == "geography"));
    }

    #[tokio::test]
    async fn generate_from_text_rejects_invalid_generator_output() {
        let mut generator = MockQuestionGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _, _| Ok(vec![generated(7)]));

        let mut questions = MockQuestionRepository::new();
        questions.expect_insert_many().times(0);

        let service = QuestionService::new(Arc::new(questions), Arc::new(generator));
        let result = service
            .generate_from_text(generate_request(), "teacher-1")
            .await;

        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[tokio::test]
    async fn update_question_applies_partial_fields() {
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_owned().returning(|id, teacher_id| {
            let mut question = Question::new(
                teacher_id,
                "manual-text",
                "geography",
                "Capital of France?",
                vec![
                    "Paris".to_string(),
                    "London".to_string(),
                    "Berlin".to_string(),
                    "Madrid".to_string(),
                ],
                0,
                "",
            );
            question.id = id.to_string();
            Ok(Some(question))
        });
        questions
            .expect_update_owned()
            .returning(|question| Ok(question));

        let generator = MockQuestionGenerator::new();
        let service = QuestionService::new(Arc::new(questions), Arc::new(generator));

        let request = UpdateQuestionRequest {
            question_text: None,
            options: None,
            correct_index: Some(3),
            explanation: Some("Madrid is a distractor.".to_string()),
            category: None,
        };

        let question = service
            .update_question("q-1", "teacher-1", request)
            .await
            .unwrap();

        assert_eq!(question.correct_index, 3);
        assert_eq!(question.explanation, "Madrid is a distractor.");
        assert_eq!(question.question_text, "Capital of France?");
    }

    #[tokio::test]
    async fn update_question_of_foreign_teacher_is_not_found() {
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_owned().returning(|_, _| Ok(None));

        let generator = MockQuestionGenerator::new();
        let service = QuestionService::new(Arc::new(questions), Arc::new(generator));

        let request = UpdateQuestionRequest {
            question_text: Some("Rewritten".to_string()),
            options: None,
            correct_index: None,
            explanation: None,
            category: None,
        };

        let result = service.update_question("q-1", "teacher-2", request).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
