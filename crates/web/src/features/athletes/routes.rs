use axum::{Router, routing::get};

use super::handlers::{
    create_athlete, delete_athlete, get_athlete, list_athletes, update_athlete,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/atletas", get(list_athletes).post(create_athlete))
        .route("/atletas/", get(list_athletes).post(create_athlete))
        .route(
            "/atletas/:id",
            get(get_athlete).patch(update_athlete).delete(delete_athlete),
        )
}
