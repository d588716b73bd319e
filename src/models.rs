use crate::errors::AppError;
use crate::habits::{Habit, HabitId, HabitTracker, Reward};
use crate::journal::Journal;
use crate::mood::MoodStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub moods: MoodStore,
    pub journal: Journal,
    pub habits: HabitTracker,
}

#[derive(Debug, Deserialize)]
pub struct SaveMoodRequest {
    pub value: i32,
    pub label: Option<String>,
    #[serde(default)]
    pub comment: String,
    pub emotions: Option<BTreeSet<String>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToggleRequest {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitView {
    pub id: HabitId,
    pub name: String,
    pub streak: u32,
    pub longest_streak: u32,
    pub completed_today: bool,
}

#[derive(Debug, Serialize)]
pub struct HabitsResponse {
    pub habits: Vec<HabitView>,
    pub trees: u32,
    pub rewards: Vec<Reward>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub habit: HabitView,
    pub trees: u32,
    pub rewards: Vec<Reward>,
}

#[derive(Debug, Serialize)]
pub struct DailyMoodPoint {
    pub date: String,
    pub value: Option<i32>,
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyMoodPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub days_logged: u8,
    pub avg_value: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub last_7_days: Vec<DailyMoodPoint>,
    pub weekly_averages: Vec<WeeklyMoodPoint>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub trees: u32,
    pub habit_count: usize,
    pub mood_entries: usize,
    pub journal_entries: usize,
}

impl HabitView {
    pub fn from_habit(habit: &Habit, tracker: &HabitTracker, today: NaiveDate) -> Self {
        Self {
            id: habit.id,
            name: habit.name.clone(),
            streak: habit.streak,
            longest_streak: tracker.longest_streak(habit.id),
            completed_today: tracker.completions.is_complete(today, habit.id),
        }
    }
}

impl ToggleRequest {
    /// An empty body means "today"; anything else must be a valid request.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|err| AppError::bad_request(format!("invalid toggle request: {err}")))
    }
}

impl HabitsResponse {
    /// Brings every streak up to `today` and reports any milestone it crossed.
    pub fn refreshed(tracker: &mut HabitTracker, today: NaiveDate) -> Self {
        let rewards = tracker.refresh_streaks(today);
        Self {
            habits: tracker
                .habits
                .iter()
                .map(|habit| HabitView::from_habit(habit, tracker, today))
                .collect(),
            trees: tracker.trees,
            rewards,
        }
    }
}
