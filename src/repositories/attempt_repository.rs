use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Attempt};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt>;
    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Attempt>>;
    /// Highest-scoring attempts, optionally restricted to the given quiz ids.
    /// Ties keep whatever stable order the store returns.
    async fn top_by_score(
        &self,
        quiz_ids: Option<Vec<String>>,
        limit: i64,
    ) -> AppResult<Vec<Attempt>>;
}

pub struct MongoAttemptRepository {
    collection: Collection<Attempt>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("attempts");
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

        let score_index = IndexModel::builder()
            .keys(doc! { "score": -1 })
            .options(IndexOptions::builder().name("score_desc".to_string()).build())
            .build();

        let student_index = IndexModel::builder()
            .keys(doc! { "student_id": 1 })
            .options(IndexOptions::builder().name("student_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(score_index).await?;
        self.collection.create_index(student_index).await?;

        log::info!("Created indexes for attempts collection");
        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Attempt>> {
        let cursor = self
            .collection
            .find(doc! { "student_id": student_id })
            .await?;
        let attempts: Vec<Attempt> = cursor.try_collect().await?;
        Ok(attempts)
    }

    async fn top_by_score(
        &self,
        quiz_ids: Option<Vec<String>>,
        limit: i64,
    ) -> AppResult<Vec<Attempt>> {
        let filter = match quiz_ids {
            Some(ids) => doc! { "quiz_id": { "$in": ids } },
            None => doc! {},
        };

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "score": -1 })
            .limit(limit)
            .await?;
        let attempts: Vec<Attempt> = cursor.try_collect().await?;
        Ok(attempts)
    }
}
