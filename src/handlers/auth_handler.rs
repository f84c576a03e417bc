use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{LoginRequest, RefreshTokenRequest, SignupRequest},
};

#[post("/signup")]
async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.signup(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/refresh")]
async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .user_service
        .refresh(&request.refresh_token)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Logout works off the refresh token itself, so it needs no access token;
/// possessing the refresh token is the credential being surrendered.
#[post("/logout")]
async fn logout(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let claims = state
        .jwt_service
        .validate_refresh_token(&request.refresh_token)?;
    let revoked = state.user_service.logout(&claims.sub).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Logged out",
        "revoked_tokens": revoked
    })))
}
