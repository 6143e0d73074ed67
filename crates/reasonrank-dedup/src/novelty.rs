//! Novelty premium
//!
//! A fresh argument has not yet been compared against everything the
//! community knows. Until it has, an apparently original submission gets a
//! temporary multiplier that decays exponentially toward the floor.

use crate::config::NoveltyConfig;
use crate::DuplicationError;
use chrono::{DateTime, Utc};

/// Time-decaying score boost for apparently original arguments
#[derive(Debug, Clone, Default)]
pub struct NoveltyPremiumCalculator {
    config: NoveltyConfig,
}

impl NoveltyPremiumCalculator {
    /// Create a calculator with the given curve
    ///
    /// Rejects curves that could produce a non-finite multiplier, such as a
    /// zero halflife.
    pub fn new(config: NoveltyConfig) -> Result<Self, DuplicationError> {
        config.validate().map_err(DuplicationError::Config)?;
        Ok(Self { config })
    }

    /// The curve in use
    pub fn config(&self) -> &NoveltyConfig {
        &self.config
    }

    /// Current multiplier for an argument, never below the floor
    ///
    /// Arguments whose uniqueness is below the novelty threshold get the
    /// floor regardless of age. Submission times in the future count as age 0.
    /// `now` defaults to the current time.
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use reasonrank_dedup::NoveltyPremiumCalculator;
    ///
    /// let calc = NoveltyPremiumCalculator::default();
    /// let now = Utc::now();
    ///
    /// assert_eq!(calc.multiplier(now, 1.0, Some(now)), 1.25);
    /// assert_eq!(calc.multiplier(now - Duration::hours(24), 1.0, Some(now)), 1.125);
    /// assert_eq!(calc.multiplier(now, 0.2, Some(now)), 1.0);
    /// ```
    pub fn multiplier(
        &self,
        submitted_at: DateTime<Utc>,
        uniqueness: f64,
        now: Option<DateTime<Utc>>,
    ) -> f64 {
        let floor = self.config.floor_multiplier;
        if uniqueness < self.config.novelty_threshold {
            return floor;
        }

        let now = now.unwrap_or_else(Utc::now);
        let age_hours = ((now - submitted_at).num_milliseconds() as f64 / 3_600_000.0).max(0.0);
        let decay = 0.5f64.powf(age_hours / self.config.halflife_hours);

        floor + (self.config.peak_multiplier - floor) * decay
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    proptest! {
        /// Property: the multiplier stays within [floor, peak] and decays with age
        #[test]
        fn test_bounded_and_decaying(age_minutes in 0i64..200_000, extra in 1i64..10_000, uniqueness in 0.0f64..=1.0) {
            let calc = NoveltyPremiumCalculator::default();
            let now = Utc::now();
            let younger = calc.multiplier(now - Duration::minutes(age_minutes), uniqueness, Some(now));
            let older = calc.multiplier(now - Duration::minutes(age_minutes + extra), uniqueness, Some(now));

            prop_assert!(younger >= 1.0 && younger <= 1.25);
            prop_assert!(older <= younger);
        }
    }
}
