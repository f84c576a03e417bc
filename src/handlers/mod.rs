pub mod auth_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod teacher_handler;
pub mod user_handler;

pub use auth_handler::{login, logout, refresh_token, signup};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{
    get_available_quizzes, get_categories, get_quiz, start_quiz, submit_quiz,
};
pub use teacher_handler::{
    create_quiz, delete_question, delete_quiz, generate_questions, get_teacher_questions,
    get_teacher_quizzes, update_question, update_quiz,
};
pub use user_handler::{get_leaderboard, get_my_history};
