use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::LeaderboardQuery,
};

#[get("/me/history")]
async fn get_my_history(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let history = state.leaderboard_service.history(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(history))
}

#[get("/leaderboard")]
async fn get_leaderboard(
    state: web::Data<AppState>,
    query: web::Query<LeaderboardQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let board = state
        .leaderboard_service
        .leaderboard(query.category.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(board))
}
