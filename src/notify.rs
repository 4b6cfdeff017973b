// src/notify.rs
// Daily reminder scheduling collaborator. Delivery is someone else's job.

use crate::plant::{Plant, PlantId, PlantStatus};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::info;

/// Time of day for reminders and the daily message batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DailyTime {
    hour: u32,
    minute: u32,
}

impl DailyTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Today's occurrence of this time in `offset`, relative to `now`
    pub fn on_day_of(&self, now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
        let local_day = now.with_timezone(&offset).date_naive();
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN);
        offset
            .from_local_datetime(&local_day.and_time(time))
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(now)
    }

    /// Whether `now` is at or after today's occurrence
    pub fn has_passed(&self, now: DateTime<Utc>, offset: FixedOffset) -> bool {
        now >= self.on_day_of(now, offset)
    }
}

impl Default for DailyTime {
    /// 9 AM
    fn default() -> Self {
        Self { hour: 9, minute: 0 }
    }
}

impl fmt::Display for DailyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for DailyTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got '{s}'"))?;
        let hour = h.parse().map_err(|_| format!("invalid hour in '{s}'"))?;
        let minute = m.parse().map_err(|_| format!("invalid minute in '{s}'"))?;
        DailyTime::new(hour, minute).ok_or_else(|| format!("time out of range: '{s}'"))
    }
}

impl TryFrom<String> for DailyTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DailyTime> for String {
    fn from(value: DailyTime) -> Self {
        value.to_string()
    }
}

pub fn notification_title(plant: &Plant) -> String {
    format!("{} needs attention! 🌱", plant.nickname)
}

pub fn notification_body(plant: &Plant) -> String {
    match plant.status {
        PlantStatus::Thirsty => format!("{} is thirsty! Time for a drink 💧", plant.nickname),
        PlantStatus::Critical => format!("🚨 {} needs urgent care! Please water immediately.", plant.nickname),
        PlantStatus::Hydrated => format!(
            "{} says hello! Check in with your rootmate today 🌿",
            plant.nickname
        ),
    }
}

/// A reminder as handed to the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub plant_id: PlantId,
    pub at: DailyTime,
    pub title: String,
    pub body: String,
}

pub trait NotificationScheduler: Send + Sync {
    /// Schedule (or replace) the repeating daily reminder for a plant
    fn schedule(&self, plant: &Plant, at: DailyTime);

    fn cancel_all(&self);
}

/// Keeps reminders in memory and logs them
#[derive(Debug, Default)]
pub struct LoggingScheduler {
    reminders: Mutex<HashMap<PlantId, Reminder>>,
}

impl LoggingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reminders(&self) -> Vec<Reminder> {
        let mut all: Vec<Reminder> = self
            .reminders
            .lock()
            .map(|r| r.values().cloned().collect())
            .unwrap_or_default();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        all
    }
}

impl NotificationScheduler for LoggingScheduler {
    fn schedule(&self, plant: &Plant, at: DailyTime) {
        let reminder = Reminder {
            plant_id: plant.id,
            at,
            title: notification_title(plant),
            body: notification_body(plant),
        };
        info!(plant = %plant.nickname, at = %at, "Scheduled daily reminder");
        if let Ok(mut reminders) = self.reminders.lock() {
            reminders.insert(plant.id, reminder);
        }
    }

    fn cancel_all(&self) {
        if let Ok(mut reminders) = self.reminders.lock() {
            reminders.clear();
        }
    }
}
