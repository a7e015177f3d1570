mod api;
mod ledger;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::warn;
use std::env;

use api::AppState;
use ledger::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY, MIN_DIFFICULTY};

fn difficulty_from_env() -> u32 {
    let requested = env::var("DIFFICULTY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DIFFICULTY);
    let clamped = requested.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    if clamped != requested {
        warn!("DIFFICULTY={requested} out of bounds, clamped to {clamped}");
    }
    clamped
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let difficulty = difficulty_from_env();

    println!("⛓️ Starting ledger API at http://{host}:{port} (difficulty {difficulty})");

    let state = web::Data::new(AppState::new(difficulty));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
