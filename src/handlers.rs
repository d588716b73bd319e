use crate::errors::AppError;
use crate::habits::HabitId;
use crate::journal::{JournalEntry, NewJournalEntry};
use crate::models::{
    CreateHabitRequest, HabitView, HabitsResponse, SaveMoodRequest, StatsResponse, ToggleRequest,
    ToggleResponse,
};
use crate::mood::{EMOTIONS, MoodEntry, mood_label};
use crate::state::AppState;
use crate::stats::build_stats;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

pub async fn get_today_mood(State(state): State<AppState>) -> Json<Option<MoodEntry>> {
    let data = state.data.lock().await;
    Json(data.moods.todays_mood_entry())
}

pub async fn list_moods(State(state): State<AppState>) -> Json<Vec<MoodEntry>> {
    let data = state.data.lock().await;
    Json(data.moods.all_mood_entries())
}

pub async fn get_mood_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Option<MoodEntry>>, AppError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))?;
    let data = state.data.lock().await;
    Ok(Json(data.moods.mood_entry_by_date(date)))
}

pub async fn save_mood(
    State(state): State<AppState>,
    Json(payload): Json<SaveMoodRequest>,
) -> Result<Json<MoodEntry>, AppError> {
    let label = payload
        .label
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| mood_label(payload.value).to_string());

    let entry = state
        .update(|data| {
            Ok(data
                .moods
                .save_mood_entry(payload.value, label, payload.comment, payload.emotions))
        })
        .await?;

    info!(date = %entry.date, value = entry.value, label = %entry.label, "mood saved");
    Ok(Json(entry))
}

pub async fn list_emotions() -> Json<Vec<&'static str>> {
    Json(EMOTIONS.to_vec())
}

pub async fn list_habits(State(state): State<AppState>) -> Result<Json<HabitsResponse>, AppError> {
    let today = today();
    let response = state
        .update(|data| Ok(HabitsResponse::refreshed(&mut data.habits, today)))
        .await?;
    Ok(Json(response))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitView>), AppError> {
    let today = today();
    let view = state
        .update(|data| {
            let habit = data.habits.add_habit(payload.name);
            Ok(HabitView::from_habit(&habit, &data.habits, today))
        })
        .await?;

    info!(id = view.id, name = %view.name, "habit added");
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<HabitId>,
) -> Result<StatusCode, AppError> {
    let habit = state
        .update(|data| Ok(data.habits.remove_habit(id)?))
        .await?;

    info!(id = habit.id, name = %habit.name, "habit removed");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<HabitId>,
    body: Bytes,
) -> Result<Json<ToggleResponse>, AppError> {
    let today = today();
    let date = ToggleRequest::from_body(&body)?.date.unwrap_or(today);

    let response = state
        .update(|data| {
            let rewards = data.habits.toggle_completion(id, date, today)?;
            let tracker = &data.habits;
            let habit = tracker
                .habit(id)
                .map(|habit| HabitView::from_habit(habit, tracker, today))
                .ok_or_else(|| AppError::not_found(format!("habit {id} not found")))?;
            Ok(ToggleResponse {
                habit,
                trees: tracker.trees,
                rewards,
            })
        })
        .await?;

    debug!(id, %date, streak = response.habit.streak, "completion toggled");
    Ok(Json(response))
}

pub async fn list_journal(State(state): State<AppState>) -> Json<Vec<JournalEntry>> {
    let data = state.data.lock().await;
    Json(data.journal.entries())
}

pub async fn create_journal_entry(
    State(state): State<AppState>,
    Json(payload): Json<NewJournalEntry>,
) -> Result<(StatusCode, Json<JournalEntry>), AppError> {
    if payload.is_blank() {
        return Err(AppError::bad_request("journal entry needs a title or content"));
    }

    let now = Local::now().naive_local();
    let entry = state
        .update(|data| Ok(data.journal.add(payload, now.date(), now.time())))
        .await?;

    info!(id = %entry.id, "journal entry added");
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn delete_journal_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .update(|data| Ok(data.journal.remove(&id)?))
        .await?;

    info!(%id, "journal entry removed");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_stats(&data)))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
