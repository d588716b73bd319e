use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/mood", get(handlers::list_moods).post(handlers::save_mood))
        .route("/api/mood/today", get(handlers::get_today_mood))
        .route("/api/mood/:date", get(handlers::get_mood_by_date))
        .route("/api/emotions", get(handlers::list_emotions))
        .route("/api/habits", get(handlers::list_habits).post(handlers::create_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route(
            "/api/journal",
            get(handlers::list_journal).post(handlers::create_journal_entry),
        )
        .route("/api/journal/:id", delete(handlers::delete_journal_entry))
        .route("/api/stats", get(handlers::get_stats))
        .with_state(state)
}
