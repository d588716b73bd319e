use crate::habits;
use crate::models::{AppData, DailyMoodPoint, StatsResponse, WeeklyMoodPoint};
use chrono::{Datelike, Duration, Local, NaiveDate};

pub fn build_stats(data: &AppData) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), data)
}

pub fn build_stats_at(today: NaiveDate, data: &AppData) -> StatsResponse {
    const WEEK_COUNT: usize = 8;

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let entry = data.moods.mood_entry_by_date(date);
        last_7_days.push(DailyMoodPoint {
            date: date.to_string(),
            value: entry.as_ref().map(|entry| entry.value),
            label: entry.map(|entry| entry.label),
        });
    }

    let current_week_start = week_start(today);
    let mut weekly_averages = Vec::with_capacity(WEEK_COUNT);

    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let mut sum = 0i64;
        let mut days_logged = 0u8;
        for day_offset in 0..7 {
            let date = start + Duration::days(day_offset);
            if let Some(entry) = data.moods.mood_entry_by_date(date) {
                sum += i64::from(entry.value);
                days_logged += 1;
            }
        }

        weekly_averages.push(WeeklyMoodPoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            days_logged,
            avg_value: (days_logged > 0).then(|| sum as f64 / f64::from(days_logged)),
        });
    }

    let tracker = &data.habits;
    let current_streak = tracker
        .habits
        .iter()
        .map(|habit| habits::current_streak(&tracker.completions, habit.id, today))
        .max()
        .unwrap_or(0);
    let longest_streak = tracker
        .habits
        .iter()
        .map(|habit| tracker.longest_streak(habit.id))
        .max()
        .unwrap_or(0);

    StatsResponse {
        last_7_days,
        weekly_averages,
        current_streak,
        longest_streak,
        trees: tracker.trees,
        habit_count: tracker.habits.len(),
        mood_entries: data.moods.len(),
        journal_entries: data.journal.len(),
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
