// src/error.rs
// Error types for the plant core, one enum per boundary

use crate::plant::PlantId;
use thiserror::Error;

/// Upsell copy shown when daily messages need a subscription
pub const DAILY_MESSAGE_UPSELL: &str = "Subscribe to RootMate Premium to get daily AI-powered messages from your plants. Start your 7-day free trial today!";

/// Failures of daily message generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MessageError {
    #[error("{}", DAILY_MESSAGE_UPSELL)]
    NotEntitled,

    /// The proxy answered with a non-200 status; carries its error string verbatim
    #[error("{0}")]
    ProviderUnavailable(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("message generation was interrupted")]
    Interrupted,
}

impl MessageError {
    /// The single human-readable string surfaced to the UI layer.
    ///
    /// Decode failures read the same as transport failures.
    pub fn user_message(&self) -> String {
        match self {
            MessageError::NotEntitled => DAILY_MESSAGE_UPSELL.to_string(),
            MessageError::ProviderUnavailable(msg) => msg.clone(),
            MessageError::Network(_) | MessageError::Decode(_) => {
                "Couldn't reach your plant right now. Check your connection and try again.".to_string()
            }
            MessageError::Interrupted => "Message generation was interrupted. Please try again.".to_string(),
        }
    }
}

impl From<reqwest::Error> for MessageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MessageError::Decode(err.to_string())
        } else {
            MessageError::Network(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for MessageError {
    fn from(_: tokio::task::JoinError) -> Self {
        MessageError::Interrupted
    }
}

/// Weather lookups. Never surfaced past the orchestrator.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("location '{0}' could not be resolved")]
    Unresolved(String),

    #[error("weather request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weather service returned status {0}")]
    Status(u16),

    #[error("failed to decode weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Plant collection mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GardenError {
    #[error(
        "Subscribe to RootMate Premium to add more than {max} plants. Get daily updates for up to {max} plants with a 7-day free trial."
    )]
    SubscriptionRequired { max: usize },

    #[error("You've reached the limit of {max} plants. Upgrade to add more plants.")]
    PlantLimitReached { max: usize },

    #[error("plant {0} not found")]
    PlantNotFound(PlantId),
}

/// Configuration problems detected at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// A failed call from the proxy to the text-generation upstream.
///
/// `status` is what the proxy answers with; `message` goes to the client as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UpstreamError {
    pub status: u16,
    pub message: String,
}

impl UpstreamError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self::new(status, format!("API request failed with status {status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // MessageError
    // ============================================================================

    #[test]
    fn test_not_entitled_carries_upsell() {
        let err = MessageError::NotEntitled;
        assert!(err.to_string().contains("RootMate Premium"));
        assert_eq!(err.user_message(), DAILY_MESSAGE_UPSELL);
    }

    #[test]
    fn test_provider_error_is_verbatim() {
        let err = MessageError::ProviderUnavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "quota exceeded");
        assert_eq!(err.user_message(), "quota exceeded");
    }

    #[test]
    fn test_decode_reads_like_network() {
        let decode = MessageError::Decode("bad json".to_string());
        let network = MessageError::Network("refused".to_string());
        assert_eq!(decode.user_message(), network.user_message());
    }

    // ============================================================================
    // GardenError
    // ============================================================================

    #[test]
    fn test_garden_error_copy() {
        let err = GardenError::PlantLimitReached { max: 5 };
        assert!(err.to_string().contains("limit of 5 plants"));

        let err = GardenError::SubscriptionRequired { max: 5 };
        assert!(err.to_string().contains("more than 5 plants"));
    }

    #[test]
    fn test_weather_unresolved_names_location() {
        let err = WeatherError::Unresolved("Atlantis".to_string());
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Missing("GEMINI_API_KEY");
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_upstream_status_message() {
        let err = UpstreamError::with_status(429);
        assert_eq!(err.status, 429);
        assert_eq!(err.to_string(), "API request failed with status 429");
    }
}
