pub mod attempt;
pub mod question;
pub mod quiz;
pub mod refresh_token;
pub mod user;
pub use attempt::{AnswerRecord, Attempt};
pub use question::Question;
pub use quiz::Quiz;
pub use refresh_token::RefreshToken;
pub use user::{HistoryEntry, User, UserRole};
