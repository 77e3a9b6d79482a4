use std::time::Duration;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("countdown must be between 1 and 600 seconds")]
    InvalidMaxTime,

    #[error("suspense delay must be between 1ms and 10s")]
    InvalidSuspense,

    #[error("reveal delays must be between 1ms and 10s")]
    InvalidRevealDelay,

    #[error("advisory connect delay must be between 1ms and 10s")]
    InvalidAdvisoryConnect,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

const MAX_DELAY: Duration = Duration::from_secs(10);

/// Pacing for a game session.
///
/// Controls the per-question countdown and the fixed delays used for dramatic
/// effect between an answer and its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    max_time_secs: u32,
    suspense: Duration,
    success_display: Duration,
    failure_display: Duration,
    advisory_connect: Duration,
}

impl Default for GameSettings {
    /// Broadcast pacing:
    /// - 30 second countdown per question
    /// - 1.5s suspense before the reveal
    /// - 1.5s to show a correct answer, 2s to show a wrong one
    /// - 2s for an advisory overlay to "connect"
    fn default() -> Self {
        Self {
            max_time_secs: 30,
            suspense: Duration::from_millis(1500),
            success_display: Duration::from_millis(1500),
            failure_display: Duration::from_millis(2000),
            advisory_connect: Duration::from_millis(2000),
        }
    }
}

impl GameSettings {
    /// Creates custom game settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the countdown is zero or above ten minutes, or
    /// any delay is zero or longer than ten seconds.
    pub fn new(
        max_time_secs: u32,
        suspense: Duration,
        success_display: Duration,
        failure_display: Duration,
        advisory_connect: Duration,
    ) -> Result<Self, SettingsError> {
        if !(1..=600).contains(&max_time_secs) {
            return Err(SettingsError::InvalidMaxTime);
        }
        if !valid_delay(suspense) {
            return Err(SettingsError::InvalidSuspense);
        }
        if !valid_delay(success_display) || !valid_delay(failure_display) {
            return Err(SettingsError::InvalidRevealDelay);
        }
        if !valid_delay(advisory_connect) {
            return Err(SettingsError::InvalidAdvisoryConnect);
        }

        Ok(Self {
            max_time_secs,
            suspense,
            success_display,
            failure_display,
            advisory_connect,
        })
    }

    /// Returns a copy with a different countdown length.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidMaxTime` if out of range.
    pub fn with_max_time_secs(self, max_time_secs: u32) -> Result<Self, SettingsError> {
        Self::new(
            max_time_secs,
            self.suspense,
            self.success_display,
            self.failure_display,
            self.advisory_connect,
        )
    }

    #[must_use]
    pub fn max_time_secs(&self) -> u32 {
        self.max_time_secs
    }

    #[must_use]
    pub fn suspense(&self) -> Duration {
        self.suspense
    }

    #[must_use]
    pub fn success_display(&self) -> Duration {
        self.success_display
    }

    #[must_use]
    pub fn failure_display(&self) -> Duration {
        self.failure_display
    }

    #[must_use]
    pub fn advisory_connect(&self) -> Duration {
        self.advisory_connect
    }
}

fn valid_delay(delay: Duration) -> bool {
    !delay.is_zero() && delay <= MAX_DELAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_broadcast_pacing() {
        let s = GameSettings::default();
        assert_eq!(s.max_time_secs(), 30);
        assert_eq!(s.suspense(), Duration::from_millis(1500));
        assert_eq!(s.failure_display(), Duration::from_secs(2));
    }

    #[test]
    fn rejects_zero_countdown() {
        let err = GameSettings::default().with_max_time_secs(0).unwrap_err();
        assert_eq!(err, SettingsError::InvalidMaxTime);
    }

    #[test]
    fn rejects_out_of_range_delays() {
        let ok = Duration::from_secs(1);
        let err = GameSettings::new(30, Duration::ZERO, ok, ok, ok).unwrap_err();
        assert_eq!(err, SettingsError::InvalidSuspense);

        let err = GameSettings::new(30, ok, ok, Duration::from_secs(11), ok).unwrap_err();
        assert_eq!(err, SettingsError::InvalidRevealDelay);

        let err = GameSettings::new(30, ok, ok, ok, Duration::ZERO).unwrap_err();
        assert_eq!(err, SettingsError::InvalidAdvisoryConnect);
    }
}
