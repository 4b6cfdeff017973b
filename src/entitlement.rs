// src/entitlement.rs
// Subscription gate consulted before premium actions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::RwLock;

/// Plants allowed per account when nothing else is configured
pub const DEFAULT_PLANT_CEILING: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    None,
    Trialing,
    Active,
    Expired,
    Unknown,
}

impl SubscriptionStatus {
    pub fn is_entitled(&self) -> bool {
        matches!(self, SubscriptionStatus::Trialing | SubscriptionStatus::Active)
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "not-subscribed" => Ok(SubscriptionStatus::None),
            "trialing" | "trial" => Ok(SubscriptionStatus::Trialing),
            "active" | "subscribed" => Ok(SubscriptionStatus::Active),
            "expired" => Ok(SubscriptionStatus::Expired),
            "unknown" => Ok(SubscriptionStatus::Unknown),
            other => Err(format!("unknown subscription status '{other}'")),
        }
    }
}

/// Purchase-platform collaborator. Receipt validation lives elsewhere.
#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    /// Refresh and return the current subscription status
    async fn status(&self) -> SubscriptionStatus;

    async fn is_entitled(&self) -> bool {
        self.status().await.is_entitled()
    }

    fn max_plants_allowed(&self) -> usize;
}

/// Entitlements fixed by configuration, switchable at runtime
#[derive(Debug)]
pub struct StaticEntitlements {
    status: RwLock<SubscriptionStatus>,
    max_plants: usize,
}

impl StaticEntitlements {
    pub fn new(status: SubscriptionStatus, max_plants: usize) -> Self {
        Self {
            status: RwLock::new(status),
            max_plants,
        }
    }

    pub fn active() -> Self {
        Self::new(SubscriptionStatus::Active, DEFAULT_PLANT_CEILING)
    }

    pub fn unsubscribed() -> Self {
        Self::new(SubscriptionStatus::None, DEFAULT_PLANT_CEILING)
    }

    pub fn set_status(&self, status: SubscriptionStatus) {
        if let Ok(mut guard) = self.status.write() {
            *guard = status;
        }
    }
}

#[async_trait]
impl EntitlementProvider for StaticEntitlements {
    async fn status(&self) -> SubscriptionStatus {
        self.status
            .read()
            .map(|s| *s)
            .unwrap_or(SubscriptionStatus::Unknown)
    }

    fn max_plants_allowed(&self) -> usize {
        self.max_plants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entitled_statuses() {
        assert!(SubscriptionStatus::Active.is_entitled());
        assert!(SubscriptionStatus::Trialing.is_entitled());
        assert!(!SubscriptionStatus::None.is_entitled());
        assert!(!SubscriptionStatus::Expired.is_entitled());
        assert!(!SubscriptionStatus::Unknown.is_entitled());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!("trial".parse::<SubscriptionStatus>(), Ok(SubscriptionStatus::Trialing));
        assert_eq!("Active".parse::<SubscriptionStatus>(), Ok(SubscriptionStatus::Active));
        assert!("gold".parse::<SubscriptionStatus>().is_err());
    }

    #[tokio::test]
    async fn test_static_entitlements_toggle() {
        let ent = StaticEntitlements::unsubscribed();
        assert!(!ent.is_entitled().await);
        ent.set_status(SubscriptionStatus::Trialing);
        assert!(ent.is_entitled().await);
        assert_eq!(ent.max_plants_allowed(), DEFAULT_PLANT_CEILING);
    }
}
