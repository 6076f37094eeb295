use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, Roster};

pub const DEFAULT_EXCHANGE_RATE: f64 = 0.2075;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30;
pub const DEFAULT_REFRESH_COOLDOWN_SECS: u64 = 30;
pub const DEFAULT_BALANCED_BELOW: f64 = 1.0;

/// Constants of one trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    /// Exactly two names; the first is party "A".
    pub participants: Roster,
    /// FOREIGN→LOCAL multiplier (JPY→TWD).
    pub exchange_rate: f64,
    /// Maximum age of a cached ledger snapshot.
    pub cache_ttl_secs: u64,
    /// Minimum delay between two manual refreshes.
    pub refresh_cooldown_secs: u64,
    /// A balance difference strictly below this is considered settled.
    pub balanced_below: f64,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            participants: Roster::default(),
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            refresh_cooldown_secs: DEFAULT_REFRESH_COOLDOWN_SECS,
            balanced_below: DEFAULT_BALANCED_BELOW,
        }
    }
}

impl TripConfig {
    pub fn validate(&self) -> ResultEngine<()> {
        if !(self.exchange_rate.is_finite() && self.exchange_rate > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "exchange_rate must be > 0, got {}",
                self.exchange_rate
            )));
        }
        if self.cache_ttl_secs == 0 {
            return Err(EngineError::InvalidConfig(
                "cache_ttl_secs must be > 0".to_string(),
            ));
        }
        if self.participants.pair().is_none() {
            return Err(EngineError::InvalidConfig(format!(
                "exactly two participants are required, got {}",
                self.participants.len()
            )));
        }
        if !(self.balanced_below.is_finite() && self.balanced_below >= 0.0) {
            return Err(EngineError::InvalidConfig(
                "balanced_below must be >= 0".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    #[must_use]
    pub fn refresh_cooldown(&self) -> Duration {
        Duration::from_secs(self.refresh_cooldown_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TripConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.participants.names(), ["Christen", "Bill"]);
        assert_eq!(config.cache_ttl(), Duration::from_secs(30));
    }

    #[test]
    fn rejects_bad_rate_and_roster() {
        let mut config = TripConfig {
            exchange_rate: 0.0,
            ..TripConfig::default()
        };
        assert!(config.validate().is_err());

        config.exchange_rate = 0.2;
        config.cache_ttl_secs = 0;
        assert!(config.validate().is_err());

        config.cache_ttl_secs = 30;
        config.participants = Roster::new(["Solo"]).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }
}
