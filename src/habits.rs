//! Habit streaks and milestone rewards.
//!
//! A streak is the run of consecutive completed days ending today. Every time a
//! habit's streak climbs onto a multiple of [`MILESTONE_DAYS`] relative to the
//! value stored before the recompute, one tree is planted.

use crate::errors::TrackerError;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

pub type HabitId = u64;

pub const MILESTONE_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub streak: u32,
}

/// Which habits were completed on which day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionLog {
    days: BTreeMap<NaiveDate, BTreeSet<HabitId>>,
}

impl CompletionLog {
    /// Flips membership of `habit` on `date` and returns whether it is now complete.
    pub fn toggle(&mut self, date: NaiveDate, habit: HabitId) -> bool {
        let completed = self.days.entry(date).or_default();
        let now_complete = if completed.remove(&habit) {
            false
        } else {
            completed.insert(habit);
            true
        };
        if completed.is_empty() {
            self.days.remove(&date);
        }
        now_complete
    }

    pub fn is_complete(&self, date: NaiveDate, habit: HabitId) -> bool {
        self.days
            .get(&date)
            .is_some_and(|completed| completed.contains(&habit))
    }

    pub fn purge(&mut self, habit: HabitId) {
        self.days.retain(|_, completed| {
            completed.remove(&habit);
            !completed.is_empty()
        });
    }

    pub fn completed_dates(&self, habit: HabitId) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days
            .iter()
            .filter(move |(_, completed)| completed.contains(&habit))
            .map(|(date, _)| *date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub habit_id: HabitId,
    pub habit_name: String,
    pub streak: u32,
}

pub fn current_streak(log: &CompletionLog, habit: HabitId, today: NaiveDate) -> u32 {
    if !log.is_complete(today, habit) {
        return 0;
    }

    let mut streak = 1;
    let mut check_date = today - Duration::days(1);
    while log.is_complete(check_date, habit) {
        streak += 1;
        check_date -= Duration::days(1);
    }
    streak
}

pub fn longest_streak(log: &CompletionLog, habit: HabitId) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for date in log.completed_dates(habit) {
        run = match prev {
            Some(prev) if date == prev + Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}

pub fn is_milestone(previous: u32, current: u32) -> bool {
    current > previous && current % MILESTONE_DAYS == 0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitTracker {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub completions: CompletionLog,
    #[serde(default)]
    pub trees: u32,
    #[serde(default = "first_id")]
    pub next_id: HabitId,
}

fn first_id() -> HabitId {
    1
}

impl Default for HabitTracker {
    fn default() -> Self {
        Self {
            habits: Vec::new(),
            completions: CompletionLog::default(),
            trees: 0,
            next_id: first_id(),
        }
    }
}

impl HabitTracker {
    pub fn add_habit(&mut self, name: impl Into<String>) -> Habit {
        let habit = Habit {
            id: self.next_id,
            name: name.into(),
            streak: 0,
        };
        self.next_id += 1;
        self.habits.push(habit.clone());
        habit
    }

    pub fn remove_habit(&mut self, id: HabitId) -> Result<Habit, TrackerError> {
        let index = self
            .habits
            .iter()
            .position(|habit| habit.id == id)
            .ok_or(TrackerError::HabitNotFound(id))?;
        self.completions.purge(id);
        Ok(self.habits.remove(index))
    }

    pub fn habit(&self, id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn toggle_completion(
        &mut self,
        id: HabitId,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Vec<Reward>, TrackerError> {
        if self.habit(id).is_none() {
            return Err(TrackerError::HabitNotFound(id));
        }
        self.completions.toggle(date, id);
        Ok(self.refresh_streaks(today))
    }

    /// Recomputes every habit's streak against `today`, awarding a tree for each
    /// habit that moved up onto a milestone.
    pub fn refresh_streaks(&mut self, today: NaiveDate) -> Vec<Reward> {
        let mut rewards = Vec::new();
        for habit in &mut self.habits {
            let streak = current_streak(&self.completions, habit.id, today);
            if is_milestone(habit.streak, streak) {
                self.trees += 1;
                info!(habit = %habit.name, streak, trees = self.trees, "milestone reached, tree planted");
                rewards.push(Reward {
                    habit_id: habit.id,
                    habit_name: habit.name.clone(),
                    streak,
                });
            }
            habit.streak = streak;
        }
        rewards
    }

    pub fn longest_streak(&self, id: HabitId) -> u32 {
        longest_streak(&self.completions, id)
    }
}
