// src/plant/status.rs
// Hydration status engine: classification, passive refresh, care recording

use super::{Plant, PlantStatus};
use chrono::{DateTime, Utc};

/// More than this many whole days without water is critical
pub const CRITICAL_AFTER_DAYS: i64 = 7;

/// More than this many whole days without water is thirsty
pub const THIRSTY_AFTER_DAYS: i64 = 3;

/// Whole days elapsed between the last watering and `now`.
///
/// Truncates toward zero, so a watering in the future counts as day 0.
pub fn days_since(last_watered: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_watered).num_days().max(0)
}

/// Map elapsed whole days to a status.
pub fn classify_days(days: i64) -> PlantStatus {
    if days > CRITICAL_AFTER_DAYS {
        PlantStatus::Critical
    } else if days > THIRSTY_AFTER_DAYS {
        PlantStatus::Thirsty
    } else {
        PlantStatus::Hydrated
    }
}

pub fn classify(last_watered: DateTime<Utc>, now: DateTime<Utc>) -> PlantStatus {
    classify_days(days_since(last_watered, now))
}

/// Passive reclassification.
///
/// Plants never watered keep whatever status they were created with. Every
/// refresh that lands on `Hydrated` bumps the health streak, even without a
/// new watering: the streak counts refreshes inside the 3-day window, not
/// care events. Kept as-is until product decides otherwise.
pub fn refresh(plant: &mut Plant, now: DateTime<Utc>) -> PlantStatus {
    let Some(last_watered) = plant.last_watered else {
        return plant.status;
    };

    plant.status = classify(last_watered, now);
    if plant.status == PlantStatus::Hydrated {
        plant.health_streak = plant.health_streak.saturating_add(1);
    }
    plant.status
}

/// Explicit watering: resets the clock, forces `Hydrated`, extends the streak.
pub fn record_care(plant: &mut Plant, now: DateTime<Utc>) {
    plant.last_watered = Some(now);
    plant.status = PlantStatus::Hydrated;
    plant.health_streak = plant.health_streak.saturating_add(1);
}
