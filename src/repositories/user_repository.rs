use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{HistoryEntry, User},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Appends one history entry to the user's embedded history array.
    async fn push_history(&self, user_id: &str, entry: HistoryEntry) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
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

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(email_index).await?;

        log::info!("Created indexes for users collection");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn push_history(&self, user_id: &str, entry: HistoryEntry) -> AppResult<()> {
        let entry_bson = to_bson(&entry)?;

        let result = self
            .collection
            .update_one(
                doc! { "id": user_id },
                doc! { "$push": { "history": entry_bson } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user_id
            )));
        }

        Ok(())
    }
}
