use super::{controllers, models};
use axum::routing::{get, post, Router};

#[rustfmt::skip]
pub fn get_routes() -> Router<models::AppState> {
    Router::new()
        .route("/", get(controllers::root))
        .route("/save", post(controllers::save_pdf))
        .route("/ping", get(controllers::pong))
}
