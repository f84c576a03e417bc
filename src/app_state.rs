use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoAttemptRepository, MongoQuestionRepository, MongoQuizRepository,
        MongoRefreshTokenRepository, MongoUserRepository, RefreshTokenRepository,
    },
    services::{
        LeaderboardService, OpenAiQuestionGenerator, QuestionService, QuizService, ScoringService,
        SessionService, UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub question_service: Arc<QuestionService>,
    pub quiz_service: Arc<QuizService>,
    pub session_service: Arc<SessionService>,
    pub scoring_service: Arc<ScoringService>,
    pub leaderboard_service: Arc<LeaderboardService>,
    pub jwt_service: JwtService,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        question_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let refresh_token_repository = Arc::new(MongoRefreshTokenRepository::new(&db));
        refresh_token_repository.ensure_indexes().await?;

        let expired = refresh_token_repository.delete_expired().await?;
        if expired > 0 {
            log::info!("Deleted {} expired refresh tokens", expired);
        }

        let jwt_service = JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.refresh_expiration_hours,
        );

        let generator = Arc::new(OpenAiQuestionGenerator::new(&config));

        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            refresh_token_repository,
            jwt_service.clone(),
        ));
        let question_service = Arc::new(QuestionService::new(
            question_repository.clone(),
            generator,
        ));
        let quiz_service = Arc::new(QuizService::new(quiz_repository.clone()));
        let session_service = Arc::new(SessionService::new(
            quiz_repository.clone(),
            question_repository.clone(),
        ));
        let scoring_service = Arc::new(ScoringService::new(
            quiz_repository.clone(),
            question_repository,
            attempt_repository.clone(),
            user_repository.clone(),
        ));
        let leaderboard_service = Arc::new(LeaderboardService::new(
            attempt_repository,
            quiz_repository,
            user_repository,
        ));

        Ok(Self {
            user_service,
            question_service,
            quiz_service,
            session_service,
            scoring_service,
            leaderboard_service,
            jwt_service,
            db,
            config: Arc::new(config),
        })
    }
}
