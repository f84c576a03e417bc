use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::SubmitQuizRequest,
};

#[get("/categories")]
async fn get_categories(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let categories = state.quiz_service.categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/available")]
async fn get_available_quizzes(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_available().await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_available(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/{id}/start")]
async fn start_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state.session_service.start_session(&id).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/{id}/submit")]
async fn submit_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .scoring_service
        .submit(&id, &auth.0.sub, &request.answers)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
