use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Question,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>>;
    /// Resolves the given ids against the store. Ids that no longer resolve
    /// are simply absent from the result; callers treat that as a filtered
    /// read, never as an error.
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>>;
    async fn find_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Question>>;
    async fn find_owned(&self, id: &str, teacher_id: &str) -> AppResult<Option<Question>>;
    async fn update_owned(&self, question: Question) -> AppResult<Question>;
    async fn delete_owned(&self, id: &str, teacher_id: &str) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let teacher_index = IndexModel::builder()
            .keys(doc! { "teacher_id": 1 })
            .options(IndexOptions::builder().name("teacher_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(teacher_index).await?;

        log::info!("Created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>> {
        if questions.is_empty() {
            return Ok(questions);
        }
        self.collection.insert_many(&questions).await?;
        Ok(questions)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?;
        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }

    async fn find_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Question>> {
        let cursor = self
            .collection
            .find(doc! { "teacher_id": teacher_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }

    async fn find_owned(&self, id: &str, teacher_id: &str) -> AppResult<Option<Question>> {
        let question = self
            .collection
            .find_one(doc! { "id": id, "teacher_id": teacher_id })
            .await?;
        Ok(question)
    }

    async fn update_owned(&self, question: Question) -> AppResult<Question> {
        let result = self
            .collection
            .replace_one(
                doc! { "id": &question.id, "teacher_id": &question.teacher_id },
                &question,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            )));
        }

        Ok(question)
    }

    async fn delete_owned(&self, id: &str, teacher_id: &str) -> AppResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "id": id, "teacher_id": teacher_id })
            .await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
