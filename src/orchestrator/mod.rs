//! Daily Message Orchestrator - one message per plant per calendar day
//!
//! Owns the user's garden and the recent-message feed, and drives:
//! - Entitlement gating before any network work
//! - Day-bucket caching so a plant speaks once a day
//! - Best-effort weather enrichment
//! - Prompt assembly and the provider call
//!
//! Generation runs on a spawned task behind a per-plant guard, so a dropped
//! caller never cancels an in-flight request and duplicates wait for the cache.

mod garden;
mod types;

pub use garden::Garden;
pub use types::*;

use crate::clock::{Clock, day_bucket};
use crate::entitlement::EntitlementProvider;
use crate::error::{GardenError, MessageError};
use crate::messages::{DailyMessage, GenerateRequest, MessageFeed, MessageProvider, PlantFacts, WeatherData};
use crate::notify::{DailyTime, NotificationScheduler};
use crate::persona;
use crate::plant::{self, Plant, PlantId, PlantStatus, UserId};
use crate::weather::{WeatherReport, WeatherSource};
use chrono::NaiveDate;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Collaborators injected into the orchestrator
#[derive(Clone)]
pub struct Services {
    pub entitlements: Arc<dyn EntitlementProvider>,
    pub weather: Arc<dyn WeatherSource>,
    pub provider: Arc<dyn MessageProvider>,
    pub notifier: Arc<dyn NotificationScheduler>,
    pub clock: Arc<dyn Clock>,
}

pub struct DailyMessageOrchestrator {
    services: Services,
    settings: OrchestratorSettings,
    garden: Mutex<Garden>,
    feed: Mutex<MessageFeed>,
    /// Per-plant generation guard; held across the provider call
    in_flight: Mutex<HashMap<PlantId, Arc<tokio::sync::Mutex<()>>>>,
    notification_time: Mutex<DailyTime>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DailyMessageOrchestrator {
    pub fn new(owner: UserId, services: Services, settings: OrchestratorSettings) -> Self {
        info!(
            provider = services.provider.name(),
            feed_cap = settings.feed_cap,
            notification_time = %settings.notification_time,
            "DailyMessageOrchestrator initialized"
        );

        Self {
            garden: Mutex::new(Garden::new(owner)),
            feed: Mutex::new(MessageFeed::new(settings.feed_cap)),
            in_flight: Mutex::new(HashMap::new()),
            notification_time: Mutex::new(settings.notification_time),
            services,
            settings,
        }
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    fn today(&self) -> NaiveDate {
        day_bucket(self.services.clock.now(), self.settings.day_offset)
    }

    fn cached_text(&self, plant_id: PlantId, day: NaiveDate) -> Option<String> {
        lock(&self.feed)
            .message_for(plant_id, day)
            .map(|m| m.message.clone())
    }

    fn guard_for(&self, plant_id: PlantId) -> Arc<tokio::sync::Mutex<()>> {
        lock(&self.in_flight).entry(plant_id).or_default().clone()
    }

    // ========================================================================
    // Daily messages
    // ========================================================================

    /// Today's message for `plant`, generating it if needed
    #[instrument(skip(self, plant), fields(plant = %plant.nickname, plant_id = %plant.id))]
    pub async fn generate_daily_message(self: &Arc<Self>, plant: &Plant) -> Result<MessageOutcome, MessageError> {
        if !self.services.entitlements.is_entitled().await {
            debug!("Daily message blocked: not entitled");
            return Err(MessageError::NotEntitled);
        }

        if let Some(text) = self.cached_text(plant.id, self.today()) {
            debug!("Daily message already generated today");
            return Ok(MessageOutcome::AlreadyHasToday(text));
        }

        let this = Arc::clone(self);
        let plant = plant.clone();
        tokio::spawn(async move { this.generate_guarded(plant).await }).await?
    }

    /// Drop the guard entry once nobody else holds or waits on it
    fn release_guard(&self, plant_id: PlantId, guard: Arc<tokio::sync::Mutex<()>>) {
        let mut in_flight = lock(&self.in_flight);
        let idle = in_flight
            .get(&plant_id)
            .is_some_and(|current| Arc::ptr_eq(current, &guard) && Arc::strong_count(&guard) == 2);
        if idle {
            in_flight.remove(&plant_id);
        }
    }

    async fn generate_guarded(self: Arc<Self>, plant: Plant) -> Result<MessageOutcome, MessageError> {
        let guard = self.guard_for(plant.id);
        let result = {
            let _held = guard.lock().await;
            self.generate_locked(&plant).await
        };
        self.release_guard(plant.id, guard);
        result
    }

    async fn generate_locked(&self, plant: &Plant) -> Result<MessageOutcome, MessageError> {
        // A concurrent caller may have finished while we waited
        if let Some(text) = self.cached_text(plant.id, self.today()) {
            return Ok(MessageOutcome::AlreadyHasToday(text));
        }
        let in_garden = self.plant(plant.id).is_some();

        let weather = self.weather_for(plant).await;
        let request = GenerateRequest {
            plant: PlantFacts::from(plant),
            weather_data: weather.as_ref().map(WeatherData::from),
            system_prompt: persona::prompt_for(&plant.species, plant.persona),
        };

        let text = self.services.provider.generate(&request).await?;

        let now = self.services.clock.now();
        {
            // Garden before feed, matching remove_plant
            let garden = lock(&self.garden);
            if in_garden && garden.get(plant.id).is_none() {
                info!("Plant removed during generation, message discarded");
                return Ok(MessageOutcome::Generated(text));
            }
            lock(&self.feed).push(
                DailyMessage::for_plant(plant, text.clone(), now),
                day_bucket(now, self.settings.day_offset),
            );
        }
        info!(chars = text.chars().count(), "Daily message generated");

        Ok(MessageOutcome::Generated(text))
    }

    /// Weather for the plant's location, or the default one. Failures are logged and dropped.
    async fn weather_for(&self, plant: &Plant) -> Option<WeatherReport> {
        let location = plant
            .location
            .as_deref()
            .or(self.settings.default_location.as_deref())?;

        match self.services.weather.weather_for(location).await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(location = %location, error = %e, "Weather unavailable, generating without it");
                None
            }
        }
    }

    /// Generate today's message for every plant that lacks one, once `schedule` has passed
    pub async fn generate_daily_messages_if_needed(self: &Arc<Self>, schedule: DailyTime) -> BatchReport {
        let now = self.services.clock.now();
        if !schedule.has_passed(now, self.settings.day_offset) {
            debug!(schedule = %schedule, "Daily batch not due yet");
            return BatchReport::not_due();
        }

        let today = day_bucket(now, self.settings.day_offset);
        let mut report = BatchReport {
            due: true,
            ..Default::default()
        };

        let mut pending = Vec::new();
        for plant in self.plants() {
            if lock(&self.feed).has_message_for(plant.id, today) {
                report.skipped += 1;
            } else {
                pending.push(plant);
            }
        }

        let results = join_all(pending.iter().map(|p| self.generate_daily_message(p))).await;

        for (plant, result) in pending.iter().zip(results) {
            match result {
                Ok(MessageOutcome::Generated(_)) => report.generated += 1,
                Ok(MessageOutcome::AlreadyHasToday(_)) => report.skipped += 1,
                Err(e) => {
                    warn!(plant = %plant.nickname, error = %e, "Daily message failed");
                    report.failed.push((plant.id, e.to_string()));
                }
            }
        }

        info!(
            generated = report.generated,
            skipped = report.skipped,
            failed = report.failed.len(),
            "Daily batch complete"
        );
        report
    }

    pub fn has_message_for_today(&self, plant_id: PlantId) -> bool {
        lock(&self.feed).has_message_for(plant_id, self.today())
    }

    pub fn todays_message(&self, plant_id: PlantId) -> Option<DailyMessage> {
        lock(&self.feed).message_for(plant_id, self.today()).cloned()
    }

    /// Newest first, at most `feed_cap` entries
    pub fn recent_messages(&self) -> Vec<DailyMessage> {
        lock(&self.feed).recent().cloned().collect()
    }

    // ========================================================================
    // Garden
    // ========================================================================

    pub async fn add_plant(&self, plant: Plant) -> Result<PlantId, GardenError> {
        let entitled = self.services.entitlements.is_entitled().await;
        let max = self.services.entitlements.max_plants_allowed();

        let id = lock(&self.garden).add(plant, entitled, max)?;
        info!(plant_id = %id, "Plant added");

        self.reschedule();
        Ok(id)
    }

    pub fn remove_plant(&self, plant_id: PlantId) -> Result<Plant, GardenError> {
        let removed = {
            let mut garden = lock(&self.garden);
            let removed = garden.remove(plant_id)?;
            lock(&self.feed).forget_plant(plant_id);
            removed
        };
        lock(&self.in_flight).remove(&plant_id);
        info!(plant = %removed.nickname, "Plant removed");

        self.reschedule();
        Ok(removed)
    }

    pub fn update_plant(&self, plant_id: PlantId, update: PlantUpdate) -> Result<Plant, GardenError> {
        let updated = lock(&self.garden).update(plant_id, update)?.clone();
        self.reschedule();
        Ok(updated)
    }

    /// The user watered the plant
    pub fn record_care(&self, plant_id: PlantId) -> Result<Plant, GardenError> {
        let now = self.services.clock.now();
        let mut garden = lock(&self.garden);
        let plant = garden.get_mut(plant_id)?;
        plant::record_care(plant, now);
        debug!(plant = %plant.nickname, streak = plant.health_streak, "Care recorded");
        Ok(plant.clone())
    }

    pub fn refresh_status(&self, plant_id: PlantId) -> Result<PlantStatus, GardenError> {
        let now = self.services.clock.now();
        let mut garden = lock(&self.garden);
        Ok(plant::refresh(garden.get_mut(plant_id)?, now))
    }

    /// Reclassify every plant, then reschedule so reminder copy matches
    pub fn refresh_all_statuses(&self) {
        let now = self.services.clock.now();
        {
            let mut garden = lock(&self.garden);
            for p in garden.iter_mut() {
                plant::refresh(p, now);
            }
        }
        self.reschedule();
    }

    pub fn plants(&self) -> Vec<Plant> {
        lock(&self.garden).iter().cloned().collect()
    }

    pub fn plant(&self, plant_id: PlantId) -> Option<Plant> {
        lock(&self.garden).get(plant_id).cloned()
    }

    pub fn health_streak(&self, plant_id: PlantId) -> Option<u32> {
        lock(&self.garden).get(plant_id).map(|p| p.health_streak)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn notification_time(&self) -> DailyTime {
        *lock(&self.notification_time)
    }

    /// Replace every reminder with one per plant at `time`
    pub fn schedule_notifications(&self, time: DailyTime) {
        *lock(&self.notification_time) = time;

        let plants = self.plants();
        self.services.notifier.cancel_all();
        for plant in &plants {
            self.services.notifier.schedule(plant, time);
        }
        debug!(count = plants.len(), at = %time, "Reminders scheduled");
    }

    fn reschedule(&self) {
        self.schedule_notifications(self.notification_time());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::entitlement::{StaticEntitlements, SubscriptionStatus};
    use crate::error::WeatherError;
    use crate::notify::LoggingScheduler;
    use crate::persona::Persona;
    use crate::weather::Coordinates;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoWeather;

    #[async_trait]
    impl WeatherSource for NoWeather {
        async fn geocode(&self, location: &str) -> Result<Coordinates, WeatherError> {
            Err(WeatherError::Unresolved(location.to_string()))
        }

        async fn fetch_current_and_daily(&self, _coords: Coordinates) -> Result<WeatherReport, WeatherError> {
            Err(WeatherError::Status(503))
        }
    }

    #[derive(Default)]
    struct EchoProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MessageProvider for EchoProvider {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn generate(&self, request: &GenerateRequest) -> Result<String, MessageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("hello from {}", request.plant.nickname))
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap()
    }

    struct Fixture {
        orchestrator: Arc<DailyMessageOrchestrator>,
        provider: Arc<EchoProvider>,
        notifier: Arc<LoggingScheduler>,
        entitlements: Arc<StaticEntitlements>,
        clock: Arc<ManualClock>,
    }

    fn fixture(max_plants: usize) -> Fixture {
        let provider = Arc::new(EchoProvider::default());
        let notifier = Arc::new(LoggingScheduler::new());
        let entitlements = Arc::new(StaticEntitlements::new(SubscriptionStatus::Active, max_plants));
        let clock = Arc::new(ManualClock::new(start()));
        let services = Services {
            entitlements: entitlements.clone(),
            weather: Arc::new(NoWeather),
            provider: provider.clone(),
            notifier: notifier.clone(),
            clock: clock.clone(),
        };
        let settings = OrchestratorSettings {
            feed_cap: 3,
            day_offset: FixedOffset::east_opt(0).unwrap(),
            default_location: None,
            notification_time: DailyTime::default(),
        };
        Fixture {
            orchestrator: Arc::new(DailyMessageOrchestrator::new(UserId::new(), services, settings)),
            provider,
            notifier,
            entitlements,
            clock,
        }
    }

    fn plant(name: &str) -> Plant {
        Plant::new(UserId::new(), name, "Monstera", Persona::SunshineBuddy)
    }

    // ========================================================================
    // Garden
    // ========================================================================

    #[tokio::test]
    async fn test_add_plant_schedules_reminder() {
        let fx = fixture(5);
        let id = fx.orchestrator.add_plant(plant("Monty")).await.unwrap();

        assert_eq!(fx.orchestrator.plants().len(), 1);
        let reminders = fx.notifier.reminders();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].plant_id, id);
        assert_eq!(reminders[0].at, DailyTime::default());
    }

    #[tokio::test]
    async fn test_plant_ceiling() {
        let fx = fixture(1);
        fx.orchestrator.add_plant(plant("One")).await.unwrap();

        assert_eq!(
            fx.orchestrator.add_plant(plant("Two")).await,
            Err(GardenError::PlantLimitReached { max: 1 })
        );

        fx.entitlements.set_status(SubscriptionStatus::Expired);
        assert_eq!(
            fx.orchestrator.add_plant(plant("Two")).await,
            Err(GardenError::SubscriptionRequired { max: 1 })
        );
    }

    #[tokio::test]
    async fn test_record_care_and_refresh() {
        let fx = fixture(5);
        let id = fx.orchestrator.add_plant(plant("Fern")).await.unwrap();

        let watered = fx.orchestrator.record_care(id).unwrap();
        assert_eq!(watered.last_watered, Some(start()));
        assert_eq!(fx.orchestrator.health_streak(id), Some(1));

        fx.clock.advance(Duration::days(5));
        assert_eq!(fx.orchestrator.refresh_status(id), Ok(PlantStatus::Thirsty));

        fx.clock.advance(Duration::days(3));
        fx.orchestrator.refresh_all_statuses();
        assert_eq!(fx.orchestrator.plant(id).unwrap().status, PlantStatus::Critical);
        assert!(fx.notifier.reminders()[0].body.contains("needs urgent care"));
    }

    #[tokio::test]
    async fn test_unknown_plant() {
        let fx = fixture(5);
        let ghost = PlantId::new();
        assert_eq!(fx.orchestrator.record_care(ghost).unwrap_err(), GardenError::PlantNotFound(ghost));
        assert!(fx.orchestrator.health_streak(ghost).is_none());
    }

    // ========================================================================
    // Messages
    // ========================================================================

    #[tokio::test]
    async fn test_generate_then_cached() {
        let fx = fixture(5);
        let p = plant("Sunny");

        let first = fx.orchestrator.generate_daily_message(&p).await.unwrap();
        let second = fx.orchestrator.generate_daily_message(&p).await.unwrap();

        assert_eq!(first, MessageOutcome::Generated("hello from Sunny".to_string()));
        assert!(second.is_cached());
        assert_eq!(first.text(), second.text());
        assert_eq!(fx.provider.calls.load(Ordering::SeqCst), 1);
        assert!(fx.orchestrator.has_message_for_today(p.id));
    }

    #[tokio::test]
    async fn test_next_day_generates_again() {
        let fx = fixture(5);
        let p = plant("Sunny");

        fx.orchestrator.generate_daily_message(&p).await.unwrap();
        fx.clock.advance(Duration::days(1));
        assert!(!fx.orchestrator.has_message_for_today(p.id));

        let outcome = fx.orchestrator.generate_daily_message(&p).await.unwrap();
        assert!(!outcome.is_cached());
        assert_eq!(fx.provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(fx.orchestrator.recent_messages().len(), 2);
    }

    #[tokio::test]
    async fn test_remove_plant_forgets_messages() {
        let fx = fixture(5);
        let id = fx.orchestrator.add_plant(plant("Gone")).await.unwrap();
        let stored = fx.orchestrator.plant(id).unwrap();
        fx.orchestrator.generate_daily_message(&stored).await.unwrap();

        fx.orchestrator.remove_plant(id).unwrap();
        assert!(fx.orchestrator.todays_message(id).is_none());
        assert!(fx.orchestrator.recent_messages().is_empty());
        assert!(fx.notifier.reminders().is_empty());
    }

    #[tokio::test]
    async fn test_guard_released_after_generation() {
        let fx = fixture(5);
        // Never added to the garden
        let loose = plant("Loose");

        fx.orchestrator.generate_daily_message(&loose).await.unwrap();
        fx.orchestrator.generate_daily_message(&plant("Other")).await.unwrap();

        assert!(lock(&fx.orchestrator.in_flight).is_empty());
        assert!(fx.orchestrator.has_message_for_today(loose.id));
    }
}
