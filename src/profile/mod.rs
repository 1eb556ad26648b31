//! # Day-of-Year Seasonal Profile
//!
//! Averages the historical daily records into 366 day-of-year buckets so
//! the projection can replay a typical year independent of which
//! calendar years were observed. Days with no observations inherit the
//! nearest preceding populated bucket. Days ahead of the first populated
//! bucket have nothing to inherit and stay explicitly unpopulated;
//! consumers get `None` there instead of an invented value.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DailyRecord;

/// Number of day-of-year buckets. Day 366 is kept as its own sparse
/// bucket (forward-filled from day 365 in non-leap histories), never
/// aliased onto day 1.
pub const DAY_BUCKETS: usize = 366;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// No historical record at all: no bucket could ever be filled.
    #[error("cannot build a seasonal profile from zero historical records")]
    EmptyHistory,
}

/// Mean observed values for one day of the year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileBucket {
    pub kwh: f64,
    pub amount: f64,
    pub avg_temp_c: f64,
}

/// Per-day-of-year averages over the full history.
///
/// Immutable once built; supplying new historical data means rebuilding
/// from scratch, there is no incremental update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalProfile {
    buckets: Vec<Option<ProfileBucket>>,
}

impl SeasonalProfile {
    /// Build the profile from historical daily records.
    pub fn build(records: &[DailyRecord]) -> Result<Self, ProfileError> {
        if records.is_empty() {
            return Err(ProfileError::EmptyHistory);
        }

        let mut sums = vec![(0.0f64, 0.0f64, 0.0f64, 0usize); DAY_BUCKETS];
        for record in records {
            let slot = &mut sums[record.date.ordinal() as usize - 1];
            slot.0 += record.kwh;
            slot.1 += record.amount;
            slot.2 += record.avg_temp_c;
            slot.3 += 1;
        }

        let mut buckets = Vec::with_capacity(DAY_BUCKETS);
        let mut carried: Option<ProfileBucket> = None;
        for (kwh, amount, temp, count) in sums {
            if count > 0 {
                let count = count as f64;
                carried = Some(ProfileBucket {
                    kwh: kwh / count,
                    amount: amount / count,
                    avg_temp_c: temp / count,
                });
            }
            buckets.push(carried);
        }

        Ok(Self { buckets })
    }

    /// Mean values for a day of the year (1..=366), if the bucket is
    /// populated or inherits from an earlier one.
    pub fn bucket(&self, day_of_year: u32) -> Option<ProfileBucket> {
        let index = day_of_year.checked_sub(1)? as usize;
        self.buckets.get(index).copied().flatten()
    }

    /// First day of the year with direct or inherited data, if any.
    pub fn first_populated_day(&self) -> Option<u32> {
        self.buckets
            .iter()
            .position(Option::is_some)
            .map(|index| index as u32 + 1)
    }

    /// True when every bucket, including the leading ones, is populated.
    pub fn is_complete(&self) -> bool {
        self.buckets.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Provenance;
    use chrono::NaiveDate;

    fn record(ordinal: u32, kwh: f64) -> DailyRecord {
        // 2023 is not a leap year, so ordinal maps directly to Jan 1 + n.
        DailyRecord {
            date: NaiveDate::from_yo_opt(2023, ordinal).unwrap(),
            kwh,
            amount: kwh / 10.0,
            avg_temp_c: 0.0,
            provenance: Provenance::Historical,
        }
    }

    #[test]
    fn test_empty_history_is_fatal() {
        assert_eq!(
            SeasonalProfile::build(&[]).unwrap_err(),
            ProfileError::EmptyHistory
        );
    }

    #[test]
    fn test_bucket_means() {
        let profile =
            SeasonalProfile::build(&[record(10, 40.0), record(10, 60.0)]).unwrap();
        let bucket = profile.bucket(10).unwrap();
        assert_eq!(bucket.kwh, 50.0);
        assert_eq!(bucket.amount, 5.0);
    }

    #[test]
    fn test_forward_fill_carries_earlier_bucket() {
        // Observations only at day 1 (A) and day 100 (B): everything in
        // between inherits A, not B.
        let profile =
            SeasonalProfile::build(&[record(1, 11.0), record(100, 99.0)]).unwrap();
        assert_eq!(profile.bucket(1).unwrap().kwh, 11.0);
        assert_eq!(profile.bucket(2).unwrap().kwh, 11.0);
        assert_eq!(profile.bucket(99).unwrap().kwh, 11.0);
        assert_eq!(profile.bucket(100).unwrap().kwh, 99.0);
        assert_eq!(profile.bucket(366).unwrap().kwh, 99.0);
    }

    #[test]
    fn test_leading_buckets_stay_unpopulated() {
        let profile = SeasonalProfile::build(&[record(40, 5.0)]).unwrap();
        assert_eq!(profile.bucket(1), None);
        assert_eq!(profile.bucket(39), None);
        assert_eq!(profile.bucket(40).unwrap().kwh, 5.0);
        assert_eq!(profile.first_populated_day(), Some(40));
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_leap_day_is_its_own_bucket() {
        let leap_day = DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            kwh: 123.0,
            amount: 12.3,
            avg_temp_c: -5.0,
            provenance: Provenance::Historical,
        };
        assert_eq!(leap_day.date.ordinal(), 60);
        let profile = SeasonalProfile::build(&[record(1, 1.0), leap_day]).unwrap();
        assert_eq!(profile.bucket(60).unwrap().kwh, 123.0);
        // Day 61 in the non-leap reference (Mar 2) inherits the leap-day
        // bucket because nothing later was observed.
        assert_eq!(profile.bucket(61).unwrap().kwh, 123.0);
    }

    #[test]
    fn test_out_of_range_days() {
        let profile = SeasonalProfile::build(&[record(1, 1.0)]).unwrap();
        assert_eq!(profile.bucket(0), None);
        assert_eq!(profile.bucket(367), None);
    }

    #[test]
    fn test_profile_is_complete_when_day_one_observed() {
        let profile = SeasonalProfile::build(&[record(1, 1.0)]).unwrap();
        assert!(profile.is_complete());
    }
}
