#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizdeck_server::{
    errors::{AppError, AppResult},
    models::domain::{Attempt, HistoryEntry, Question, Quiz, RefreshToken, User},
    repositories::{
        AttemptRepository, QuestionRepository, QuizRepository, RefreshTokenRepository,
        UserRepository,
    },
};

pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<String, Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self {
            questions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>> {
        let mut store = self.questions.write().await;
        for question in &questions {
            store.insert(question.id.clone(), question.clone());
        }
        Ok(questions)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        let store = self.questions.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| store.get(id).cloned())
            .collect())
    }

    async fn find_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Question>> {
        let store = self.questions.read().await;
        let mut items: Vec<_> = store
            .values()
            .filter(|q| q.teacher_id == teacher_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn find_owned(&self, id: &str, teacher_id: &str) -> AppResult<Option<Question>> {
        let store = self.questions.read().await;
        Ok(store
            .get(id)
            .filter(|q| q.teacher_id == teacher_id)
            .cloned())
    }

    async fn update_owned(&self, question: Question) -> AppResult<Question> {
        let mut store = self.questions.write().await;
        let owned = store
            .get(&question.id)
            .map(|existing| existing.teacher_id == question.teacher_id)
            .unwrap_or(false);

        if !owned {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            )));
        }

        store.insert(question.id.clone(), question.clone());
        Ok(question)
    }

    async fn delete_owned(&self, id: &str, teacher_id: &str) -> AppResult<()> {
        let mut store = self.questions.write().await;
        let owned = store
            .get(id)
            .map(|existing| existing.teacher_id == teacher_id)
            .unwrap_or(false);

        if !owned {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        store.remove(id);
        Ok(())
    }
}

pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| quizzes.get(id).cloned())
            .collect())
    }

    async fn find_published<'a>(&self, category: Option<&'a str>) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|quiz| quiz.published)
            .filter(|quiz| category.map(|c| quiz.category == c).unwrap_or(true))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn find_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|quiz| quiz.teacher_id == teacher_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn distinct_categories(&self) -> AppResult<Vec<String>> {
        let quizzes = self.quizzes.read().await;
        let mut categories: Vec<String> = quizzes
            .values()
            .filter(|quiz| quiz.published)
            .map(|quiz| quiz.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }

        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn update_owned(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        let owned = quizzes
            .get(&quiz.id)
            .map(|existing| existing.teacher_id == quiz.teacher_id)
            .unwrap_or(false);

        if !owned {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz.id
            )));
        }

        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn delete_owned(&self, id: &str, teacher_id: &str) -> AppResult<()> {
        let mut quizzes = self.quizzes.write().await;
        let owned = quizzes
            .get(id)
            .map(|existing| existing.teacher_id == teacher_id)
            .unwrap_or(false);

        if !owned {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        quizzes.remove(id);
        Ok(())
    }
}

/// Attempts are kept in creation order so score ties resolve the way a real
/// store's stable order would.
pub struct InMemoryAttemptRepository {
    attempts: Arc<RwLock<Vec<Attempt>>>,
}

impl InMemoryAttemptRepository {
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn count(&self) -> usize {
        self.attempts.read().await.len()
    }
}

#[async_trait]
impl AttemptRepository for InMemoryAttemptRepository {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt> {
        let mut attempts = self.attempts.write().await;
        if attempts.iter().any(|a| a.id == attempt.id) {
            return Err(AppError::AlreadyExists(format!(
                "Attempt with id '{}' already exists",
                attempt.id
            )));
        }
        attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Attempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn top_by_score(
        &self,
        quiz_ids: Option<Vec<String>>,
        limit: i64,
    ) -> AppResult<Vec<Attempt>> {
        let attempts = self.attempts.read().await;
        let mut items: Vec<_> = attempts
            .iter()
            .filter(|a| {
                quiz_ids
                    .as_ref()
                    .map(|ids| ids.contains(&a.quiz_id))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        items.sort_by(|a, b| b.score.cmp(&a.score));
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }
}

pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn push_history(&self, user_id: &str, entry: HistoryEntry) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or_else(|| {
            AppError::NotFound(format!("User with id '{}' not found", user_id))
        })?;

        user.history.push(entry);
        Ok(())
    }
}

pub struct InMemoryRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token_hash(&self, hash: &str) -> AppResult<Option<RefreshToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(hash).cloned())
    }

    async fn revoke_by_token_hash(&self, hash: &str) -> AppResult<()> {
        let mut tokens = self.tokens.write().await;
        let token = tokens
            .get_mut(hash)
            .ok_or_else(|| AppError::NotFound("Refresh token not found".to_string()))?;
        token.revoked = true;
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: &str) -> AppResult<u64> {
        let mut tokens = self.tokens.write().await;
        let mut revoked = 0;
        for token in tokens.values_mut() {
            if token.user_id == user_id && !token.revoked {
                token.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, token| token.expires_at > chrono::Utc::now());
        Ok((before - tokens.len()) as u64)
    }
}
