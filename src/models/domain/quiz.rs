use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A teacher-assembled quiz referencing questions by id.
///
/// Question references are not enforced against the questions collection;
/// ids that no longer resolve are filtered out at read time by the session
/// and scoring paths.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub teacher_id: String,
    pub category: String,
    pub question_ids: Vec<String>,
    pub time_limit_seconds: i64,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(
        title: &str,
        teacher_id: &str,
        category: &str,
        question_ids: Vec<String>,
        time_limit_seconds: i64,
        published: bool,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            teacher_id: teacher_id.to_string(),
            category: category.to_string(),
            question_ids,
            time_limit_seconds,
            published,
            created_at: Some(Utc::now()),
        }
    }
}
