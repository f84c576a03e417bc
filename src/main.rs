use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizdeck_server::{
    app_state::AppState, auth::AuthMiddleware, config::Config, handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(state.jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::health_check_live)
            .service(
                web::scope("/api/auth")
                    .service(handlers::signup)
                    .service(handlers::login)
                    .service(handlers::refresh_token)
                    .service(handlers::logout),
            )
            .service(
                web::scope("/api/quizzes")
                    .wrap(AuthMiddleware)
                    // Fixed paths must register ahead of the `{id}` matcher
                    .service(handlers::get_categories)
                    .service(handlers::get_available_quizzes)
                    .service(handlers::get_quiz)
                    .service(handlers::start_quiz)
                    .service(handlers::submit_quiz),
            )
            .service(
                web::scope("/api/users")
                    .wrap(AuthMiddleware)
                    .service(handlers::get_my_history)
                    .service(handlers::get_leaderboard),
            )
            .service(
                web::scope("/api/teacher")
                    .wrap(AuthMiddleware)
                    .service(handlers::generate_questions)
                    .service(handlers::get_teacher_questions)
                    .service(handlers::update_question)
                    .service(handlers::delete_question)
                    .service(handlers::create_quiz)
                    .service(handlers::get_teacher_quizzes)
                    .service(handlers::update_quiz)
                    .service(handlers::delete_quiz),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
