use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_teacher, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{
            CreateQuizRequest, GenerateQuestionsRequest, UpdateQuestionRequest, UpdateQuizRequest,
        },
        response::GeneratedQuestionsResponse,
    },
};

#[post("/generate-questions")]
async fn generate_questions(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuestionsRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let questions = state
        .question_service
        .generate_from_text(request.into_inner(), &auth.0.sub)
        .await?;

    Ok(HttpResponse::Ok().json(GeneratedQuestionsResponse {
        message: "Questions generated successfully".to_string(),
        count: questions.len(),
        questions,
    }))
}

#[get("/questions")]
async fn get_teacher_questions(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let questions = state.question_service.list_for_teacher(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[put("/questions/{id}")]
async fn update_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let question = state
        .question_service
        .update_question(&id, &auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/questions/{id}")]
async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    state
        .question_service
        .delete_question(&id, &auth.0.sub)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Question deleted" })))
}

#[post("/quizzes")]
async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let quiz = state
        .quiz_service
        .create_quiz(request.into_inner(), &auth.0.sub)
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("/quizzes")]
async fn get_teacher_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let quizzes = state.quiz_service.list_for_teacher(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[put("/quizzes/{id}")]
async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let quiz = state
        .quiz_service
        .update_quiz(&id, &auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/quizzes/{id}")]
async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    state.quiz_service.delete_quiz(&id, &auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Quiz deleted" })))
}
