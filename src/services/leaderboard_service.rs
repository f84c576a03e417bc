use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::response::{HistoryEntryView, LeaderboardEntry},
    },
    repositories::{AttemptRepository, QuizRepository, UserRepository},
};

const LEADERBOARD_LIMIT: i64 = 10;

/// Read-only aggregation over attempts and embedded history entries.
pub struct LeaderboardService {
    attempts: Arc<dyn AttemptRepository>,
    quizzes: Arc<dyn QuizRepository>,
    users: Arc<dyn UserRepository>,
}

impl LeaderboardService {
    pub fn new(
        attempts: Arc<dyn AttemptRepository>,
        quizzes: Arc<dyn QuizRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            attempts,
            quizzes,
            users,
        }
    }

    /// Top attempts by score, optionally restricted to a category. The
    /// category filter resolves published quizzes first; a category with no
    /// published quizzes yields an empty board. Ties keep store order.
    pub async fn leaderboard(&self, category: Option<&str>) -> AppResult<Vec<LeaderboardEntry>> {
        let quiz_filter = match category {
            Some(category) => {
                let published = self.quizzes.find_published(Some(category)).await?;
                if published.is_empty() {
                    return Ok(Vec::new());
                }
                Some(published.into_iter().map(|quiz| quiz.id).collect::<Vec<_>>())
            }
            None => None,
        };

        let attempts = self.attempts.top_by_score(quiz_filter, LEADERBOARD_LIMIT).await?;

        let student_ids = distinct(attempts.iter().map(|a| a.student_id.clone()));
        let quiz_ids = distinct(attempts.iter().map(|a| a.quiz_id.clone()));

        let student_names: HashMap<String, String> = self
            .users
            .find_by_ids(&student_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.name))
            .collect();
        let quiz_index = self.quiz_index(&quiz_ids).await?;

        let entries = attempts
            .into_iter()
            .map(|attempt| LeaderboardEntry {
                student_name: student_names.get(&attempt.student_id).cloned(),
                quiz_title: quiz_index
                    .get(&attempt.quiz_id)
                    .map(|quiz| quiz.title.clone()),
                category: quiz_index
                    .get(&attempt.quiz_id)
                    .map(|quiz| quiz.category.clone()),
                score: attempt.score,
                correct: attempt.correct,
                wrong: attempt.wrong,
            })
            .collect();

        Ok(entries)
    }

    /// A student's embedded history in append (i.e. submission) order, each
    /// entry annotated with quiz metadata. Entries pointing at deleted
    /// quizzes stay in the list with empty annotations.
    pub async fn history(&self, student_id: &str) -> AppResult<Vec<HistoryEntryView>> {
        let user = self
            .users
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", student_id)))?;

        let quiz_ids = distinct(user.history.iter().map(|entry| entry.quiz_id.clone()));
        let quiz_index = self.quiz_index(&quiz_ids).await?;

        let entries = user
            .history
            .into_iter()
            .map(|entry| HistoryEntryView {
                quiz_title: quiz_index.get(&entry.quiz_id).map(|quiz| quiz.title.clone()),
                category: quiz_index
                    .get(&entry.quiz_id)
                    .map(|quiz| quiz.category.clone()),
                score: entry.score,
                correct: entry.correct,
                wrong: entry.wrong,
                total: entry.total,
                date: entry.date,
            })
            .collect();

        Ok(entries)
    }

    async fn quiz_index(&self, quiz_ids: &[String]) -> AppResult<HashMap<String, Quiz>> {
        let quizzes = self.quizzes.find_by_ids(quiz_ids).await?;
        Ok(quizzes
            .into_iter()
            .map(|quiz| (quiz.id.clone(), quiz))
            .collect())
    }
}

fn distinct(ids: impl Iterator<Item = String>) -> Vec<String> {
    let mut ids: Vec<String> = ids.collect();
    ids.sort();
    ids.dedup();
    ids
}
