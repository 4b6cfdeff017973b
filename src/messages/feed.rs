// src/messages/feed.rs
// Bounded recent-message feed plus the per-day message index

use crate::persona::Persona;
use crate::plant::{Plant, PlantId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

/// Default number of messages kept in the feed
pub const DEFAULT_FEED_CAP: usize = 20;

/// A generated message, frozen with the plant details it was written for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMessage {
    pub id: Uuid,
    pub plant_id: PlantId,
    pub plant_nickname: String,
    pub plant_species: String,
    pub plant_persona: Persona,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl DailyMessage {
    pub fn for_plant(plant: &Plant, message: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            plant_id: plant.id,
            plant_nickname: plant.nickname.clone(),
            plant_species: plant.species.clone(),
            plant_persona: plant.persona,
            message: message.into(),
            created_at,
        }
    }
}

/// Newest-first feed capped at `cap`, with a (plant, day) index that
/// outlives feed eviction so a busy garden never regenerates a message.
#[derive(Debug, Clone)]
pub struct MessageFeed {
    cap: usize,
    entries: VecDeque<DailyMessage>,
    by_day: HashMap<(PlantId, NaiveDate), DailyMessage>,
}

impl MessageFeed {
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            entries: VecDeque::with_capacity(cap.max(1) + 1),
            by_day: HashMap::new(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `message` as the message for `day`.
    ///
    /// Index entries from earlier days are dropped; only today matters for
    /// deduplication.
    pub fn push(&mut self, message: DailyMessage, day: NaiveDate) {
        self.by_day.retain(|(_, d), _| *d >= day);
        self.by_day.insert((message.plant_id, day), message.clone());

        self.entries.push_front(message);
        self.entries.truncate(self.cap);
    }

    pub fn message_for(&self, plant_id: PlantId, day: NaiveDate) -> Option<&DailyMessage> {
        self.by_day.get(&(plant_id, day))
    }

    pub fn has_message_for(&self, plant_id: PlantId, day: NaiveDate) -> bool {
        self.by_day.contains_key(&(plant_id, day))
    }

    /// Newest first
    pub fn recent(&self) -> impl Iterator<Item = &DailyMessage> {
        self.entries.iter()
    }

    /// Forget everything about a removed plant
    pub fn forget_plant(&mut self, plant_id: PlantId) {
        self.entries.retain(|m| m.plant_id != plant_id);
        self.by_day.retain(|(id, _), _| *id != plant_id);
    }
}

impl Default for MessageFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAP)
    }
}
