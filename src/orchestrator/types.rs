//! Orchestrator types: settings, outcomes, batch reports

use crate::clock::local_offset;
use crate::messages::feed::DEFAULT_FEED_CAP;
use crate::notify::DailyTime;
use crate::persona::Persona;
use crate::plant::PlantId;
use chrono::FixedOffset;

// ============================================================================
// Settings
// ============================================================================

/// Knobs for a single orchestrator instance
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Recent-message feed length
    pub feed_cap: usize,
    /// Offset used to decide which calendar day a timestamp belongs to
    pub day_offset: FixedOffset,
    /// Used for weather when a plant has no location of its own
    pub default_location: Option<String>,
    /// Reminder time, also the earliest time the daily batch runs
    pub notification_time: DailyTime,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            feed_cap: DEFAULT_FEED_CAP,
            day_offset: local_offset(),
            default_location: None,
            notification_time: DailyTime::default(),
        }
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Result of asking for a plant's daily message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Freshly generated and cached
    Generated(String),
    /// Today's message already existed; no network call was made
    AlreadyHasToday(String),
}

impl MessageOutcome {
    pub fn text(&self) -> &str {
        match self {
            MessageOutcome::Generated(t) | MessageOutcome::AlreadyHasToday(t) => t,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            MessageOutcome::Generated(t) | MessageOutcome::AlreadyHasToday(t) => t,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, MessageOutcome::AlreadyHasToday(_))
    }
}

/// Tally of a daily batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// False when the schedule time has not arrived yet
    pub due: bool,
    pub generated: usize,
    pub skipped: usize,
    pub failed: Vec<(PlantId, String)>,
}

impl BatchReport {
    pub fn not_due() -> Self {
        Self::default()
    }
}

// ============================================================================
// Edits
// ============================================================================

/// Profile fields a user may change; `None` leaves the field alone
#[derive(Debug, Clone, Default)]
pub struct PlantUpdate {
    pub nickname: Option<String>,
    pub species: Option<String>,
    pub persona: Option<Persona>,
    pub location: Option<Option<String>>,
}
