use chrono::Duration;

use crate::domain::{BillingPeriod, DailyRecord, Provenance};

/// Expand one billing period into one record per covered day.
///
/// Consumption and amount are split into equal daily shares, so the sum
/// over the period reproduces the stated totals up to floating
/// precision. The statement carries a single temperature observation per
/// period, and every derived day repeats it; the per-day temperature is
/// deliberately not interpolated. A zero-day period expands to nothing.
pub fn decompose(period: &BillingPeriod) -> Vec<DailyRecord> {
    if period.days == 0 {
        return Vec::new();
    }
    let share = f64::from(period.days);
    let kwh = period.kwh / share;
    let amount = period.amount / share;
    (0..period.days)
        .map(|offset| DailyRecord {
            date: period.starts_on + Duration::days(i64::from(offset)),
            kwh,
            amount,
            avg_temp_c: period.avg_temp_c,
            provenance: Provenance::Historical,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn period(days: u32, kwh: f64, amount: f64) -> BillingPeriod {
        BillingPeriod {
            starts_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ends_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(i64::from(days)),
            days,
            kwh,
            amount,
            avg_temp_c: -10.0,
        }
    }

    #[test]
    fn test_equal_shares_and_consecutive_dates() {
        let records = decompose(&period(4, 200.0, 15.0));
        assert_eq!(records.len(), 4);
        for (offset, record) in records.iter().enumerate() {
            assert_eq!(
                record.date,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset as i64)
            );
            assert_eq!(record.kwh, 50.0);
            assert_eq!(record.amount, 3.75);
            assert_eq!(record.avg_temp_c, -10.0);
            assert_eq!(record.provenance, Provenance::Historical);
        }
    }

    #[test]
    fn test_zero_day_period_is_a_noop() {
        assert!(decompose(&period(0, 100.0, 8.0)).is_empty());
    }

    #[test]
    fn test_decomposition_is_referentially_transparent() {
        let p = period(7, 312.5, 21.4);
        let first = decompose(&p);
        let second = decompose(&p);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.date, b.date);
            assert_eq!(a.kwh, b.kwh);
            assert_eq!(a.amount, b.amount);
        }
    }

    proptest! {
        #[test]
        fn prop_shares_sum_to_period_totals(
            days in 1u32..2000,
            kwh in 0.0f64..1_000_000.0,
            amount in 0.0f64..100_000.0,
        ) {
            let records = decompose(&period(days, kwh, amount));
            prop_assert_eq!(records.len(), days as usize);

            let kwh_sum: f64 = records.iter().map(|r| r.kwh).sum();
            let amount_sum: f64 = records.iter().map(|r| r.amount).sum();
            // 1e-9 relative tolerance.
            prop_assert!((kwh_sum - kwh).abs() <= 1e-9 * kwh.max(1.0));
            prop_assert!((amount_sum - amount).abs() <= 1e-9 * amount.max(1.0));
        }
    }
}
