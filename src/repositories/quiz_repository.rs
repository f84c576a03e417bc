use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Quiz,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>>;
    async fn find_published<'a>(&self, category: Option<&'a str>) -> AppResult<Vec<Quiz>>;
    async fn find_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Quiz>>;
    async fn distinct_categories(&self) -> AppResult<Vec<String>>;
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn update_owned(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn delete_owned(&self, id: &str, teacher_id: &str) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
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

        let published_category_index = IndexModel::builder()
            .keys(doc! { "published": 1, "category": 1 })
            .options(
                IndexOptions::builder()
                    .name("published_category".to_string())
                    .build(),
            )
            .build();

        let teacher_index = IndexModel::builder()
            .keys(doc! { "teacher_id": 1 })
            .options(IndexOptions::builder().name("teacher_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(published_category_index).await?;
        self.collection.create_index(teacher_index).await?;

        log::info!("Created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;
        Ok(quizzes)
    }

    async fn find_published<'a>(&self, category: Option<&'a str>) -> AppResult<Vec<Quiz>> {
        let mut filter = doc! { "published": true };
        if let Some(category) = category {
            filter.insert("category", category);
        }

        let cursor = self.collection.find(filter).await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;
        Ok(quizzes)
    }

    async fn find_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Quiz>> {
        let cursor = self
            .collection
            .find(doc! { "teacher_id": teacher_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;
        Ok(quizzes)
    }

    async fn distinct_categories(&self) -> AppResult<Vec<String>> {
        let values = self
            .collection
            .distinct("category", doc! { "published": true })
            .await?;

        let categories = values
            .into_iter()
            .filter_map(|value| value.as_str().map(|s| s.to_string()))
            .collect();
        Ok(categories)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn update_owned(&self, quiz: Quiz) -> AppResult<Quiz> {
        let result = self
            .collection
            .replace_one(
                doc! { "id": &quiz.id, "teacher_id": &quiz.teacher_id },
                &quiz,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz.id
            )));
        }

        Ok(quiz)
    }

    async fn delete_owned(&self, id: &str, teacher_id: &str) -> AppResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "id": id, "teacher_id": teacher_id })
            .await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        Ok(())
    }
}
