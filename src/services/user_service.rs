use std::sync::Arc;

use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    auth::{
        password::{hash_password, verify_password},
        JwtService,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{refresh_token::hash_token, RefreshToken, User},
        dto::{
            request::{LoginRequest, SignupRequest},
            response::{AuthResponse, RefreshTokenResponse, UserView},
        },
    },
    repositories::{RefreshTokenRepository, UserRepository},
};

/// Signup, login and refresh-token rotation.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    jwt_service: JwtService,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            jwt_service,
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                request.email
            )));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(&request.name, &request.email, &password_hash, request.role);
        let user = self.users.create(user).await?;

        self.issue_tokens(user).await
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        // A missing account and a bad password are deliberately the same
        // failure from the outside.
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        self.issue_tokens(user).await
    }

    /// Rotates a refresh token: the presented token must validate as a JWT
    /// and still be live in the store; it is revoked before a new pair is
    /// issued.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshTokenResponse> {
        let claims = self.jwt_service.validate_refresh_token(refresh_token)?;

        let token_hash = hash_token(refresh_token);
        let stored = self
            .refresh_tokens
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Refresh token is not recognized".to_string()))?;

        if !stored.is_valid() {
            return Err(AppError::Unauthorized(
                "Refresh token has been revoked or expired".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("User associated with refresh token not found".to_string())
            })?;

        self.refresh_tokens.revoke_by_token_hash(&token_hash).await?;

        let token = self.jwt_service.create_token(&user)?;
        let refresh_token = self.create_refresh_token(&user.id).await?;

        log::info!("Token refreshed for user {}", user.id);

        Ok(RefreshTokenResponse {
            token,
            refresh_token,
        })
    }

    /// Revokes every live refresh token the user holds.
    pub async fn logout(&self, user_id: &str) -> AppResult<u64> {
        self.refresh_tokens.revoke_all_for_user(user_id).await
    }

    async fn issue_tokens(&self, user: User) -> AppResult<AuthResponse> {
        let token = self.jwt_service.create_token(&user)?;
        let refresh_token = self.create_refresh_token(&user.id).await?;

        Ok(AuthResponse {
            token,
            refresh_token,
            user: UserView::from(user),
        })
    }

    async fn create_refresh_token(&self, user_id: &str) -> AppResult<String> {
        let refresh_token = self.jwt_service.create_refresh_token(user_id)?;
        let expires_at =
            Utc::now() + Duration::hours(self.jwt_service.refresh_expiration_hours());

        self.refresh_tokens
            .create(RefreshToken::new(
                user_id.to_string(),
                hash_token(&refresh_token),
                expires_at,
            ))
            .await?;

        Ok(refresh_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::domain::UserRole;
    use crate::repositories::refresh_token_repository::MockRefreshTokenRepository;
    use crate::repositories::user_repository::MockUserRepository;

    fn jwt_service() -> JwtService {
        let config = Config::test_config();
        JwtService::new(&config.jwt_secret, 1, 168)
    }

    fn signup_request() -> SignupRequest {
        SignupRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "correct-horse".to_string(),
            role: UserRole::Student,
        }
    }

    #[tokio::test]
    async fn signup_issues_tokens_and_redacted_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|user| Ok(user));

        let mut refresh_tokens = MockRefreshTokenRepository::new();
        refresh_tokens.expect_create().returning(|token| Ok(token));

        let service = UserService::new(
            Arc::new(users),
            Arc::new(refresh_tokens),
            jwt_service(),
        );

        let response = service.signup(signup_request()).await.unwrap();

        assert!(!response.token.is_empty());
        assert!(!response.refresh_token.is_empty());
        assert_eq!(response.user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| {
            Ok(Some(User::new(
                "Ada",
                "ada@example.com",
                "hash",
                UserRole::Student,
            )))
        });
        users.expect_create().times(0);

        let refresh_tokens = MockRefreshTokenRepository::new();
        let service = UserService::new(
            Arc::new(users),
            Arc::new(refresh_tokens),
            jwt_service(),
        );

        let result = service.signup(signup_request()).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn login_rejects_bad_password_and_unknown_email_identically() {
        let password_hash = hash_password("correct-horse").unwrap();

        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(move |email| {
            if email == "ada@example.com" {
                let mut user =
                    User::new("Ada", "ada@example.com", &password_hash, UserRole::Student);
                user.id = "user-1".to_string();
                Ok(Some(user))
            } else {
                Ok(None)
            }
        });

        let refresh_tokens = MockRefreshTokenRepository::new();
        let service = UserService::new(
            Arc::new(users),
            Arc::new(refresh_tokens),
            jwt_service(),
        );

        let bad_password = service
            .login(LoginRequest {
                email: "ada@example.com".to_string(),
                password: "wrong-horse".to_string(),
            })
            .await;
        let unknown_email = service
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "correct-horse".to_string(),
            })
            .await;

        let bad_password_message = match bad_password {
            Err(AppError::Unauthorized(message)) => message,
            other => panic!("expected Unauthorized, got {:?}", other.map(|_| ())),
        };
        let unknown_email_message = match unknown_email {
            Err(AppError::Unauthorized(message)) => message,
            other => panic!("expected Unauthorized, got {:?}", other.map(|_| ())),
        };

        assert_eq!(bad_password_message, unknown_email_message);
    }

    #[tokio::test]
    async fn refresh_rejects_revoked_token() {
        let jwt = jwt_service();
        let refresh_token = jwt.create_refresh_token("user-1").unwrap();
        let token_hash = hash_token(&refresh_token);

        let mut refresh_tokens = MockRefreshTokenRepository::new();
        refresh_tokens
            .expect_find_by_token_hash()
            .returning(move |_| {
                let mut stored = RefreshToken::new(
                    "user-1".to_string(),
                    token_hash.clone(),
                    Utc::now() + Duration::days(7),
                );
                stored.revoked = true;
                Ok(Some(stored))
            });

        let users = MockUserRepository::new();
        let service = UserService::new(Arc::new(users), Arc::new(refresh_tokens), jwt);

        let result = service.refresh(&refresh_token).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn refresh_rotates_live_token() {
        let jwt = jwt_service();
        let refresh_token = jwt.create_refresh_token("user-1").unwrap();
        let token_hash = hash_token(&refresh_token);

        let mut refresh_tokens = MockRefreshTokenRepository::new();
        refresh_tokens
            .expect_find_by_token_hash()
            .returning(move |_| {
                Ok(Some(RefreshToken::new(
                    "user-1".to_string(),
                    token_hash.clone(),
                    Utc::now() + Duration::days(7),
                )))
            });
        refresh_tokens
            .expect_revoke_by_token_hash()
            .times(1)
            .returning(|_| Ok(()));
        refresh_tokens.expect_create().returning(|token| Ok(token));

        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| {
            let mut user = User::new("Ada", "ada@example.com", "hash", UserRole::Student);
            user.id = "user-1".to_string();
            Ok(Some(user))
        });

        let service = UserService::new(Arc::new(users), Arc::new(refresh_tokens), jwt);

        let response = service.refresh(&refresh_token).await.unwrap();
        assert!(!response.token.is_empty());
        assert_ne!(response.refresh_token, refresh_token);
    }
}
