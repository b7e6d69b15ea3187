//! Hour-of-day and day-of-week P&L buckets keyed on entry time.
//!
//! Timestamps are bucketed in a fixed offset (UTC unless configured), never
//! in the machine's local zone.

use chrono::{Datelike, FixedOffset, Offset, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trade::Trade;

const HOURS: usize = 24;
const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Time-zone policy for bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketPolicy {
    offset: FixedOffset,
}

impl BucketPolicy {
    /// Bucket in UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Bucket in a fixed offset east of UTC, in minutes.
    ///
    /// Returns `None` when the offset is out of chrono's range (±24h).
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self { offset })
    }

    /// The offset in use.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for BucketPolicy {
    fn default() -> Self {
        Self::utc()
    }
}

/// One time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// Hour 0–23, or weekday 0 (Sunday) – 6 (Saturday).
    pub index: u32,
    /// Display label (`"9:00"`, `"Mon"`).
    pub label: String,
    /// Sum of realized P&L.
    pub pnl: Decimal,
    /// Number of trades.
    pub trade_count: u64,
}

/// Both bucketings of a trade set. Every bucket is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBuckets {
    /// 24 buckets, hour 0 first.
    pub by_hour: Vec<TimeBucket>,
    /// 7 buckets, Sunday first.
    pub by_weekday: Vec<TimeBucket>,
}

impl TimeBuckets {
    /// Bucket trades by entry hour and entry weekday.
    #[must_use]
    pub fn from_trades(trades: &[Trade], policy: BucketPolicy) -> Self {
        let mut by_hour: Vec<TimeBucket> = (0..HOURS as u32)
            .map(|h| empty_bucket(h, format!("{h}:00")))
            .collect();
        let mut by_weekday: Vec<TimeBucket> = WEEKDAY_LABELS
            .iter()
            .zip(0u32..)
            .map(|(label, d)| empty_bucket(d, (*label).to_string()))
            .collect();

        for trade in trades {
            let local = trade.entry_time.with_timezone(&policy.offset);
            add(&mut by_hour[local.hour() as usize], trade);
            add(
                &mut by_weekday[local.weekday().num_days_from_sunday() as usize],
                trade,
            );
        }

        Self {
            by_hour,
            by_weekday,
        }
    }
}

fn empty_bucket(index: u32, label: String) -> TimeBucket {
    TimeBucket {
        index,
        label,
        pnl: Decimal::ZERO,
        trade_count: 0,
    }
}

fn add(bucket: &mut TimeBucket, trade: &Trade) {
    bucket.pnl = bucket.pnl.saturating_add(trade.realized_pnl);
    bucket.trade_count += 1;
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::trade::test_support::trade;

    fn entered_at(id: &str, pnl: i64, y: i32, m: u32, d: u32, h: u32) -> Trade {
        let mut t = trade(id, "SOL", pnl, 0);
        t.entry_time = Utc
            .with_ymd_and_hms(y, m, d, h, 15, 0)
            .single()
            .unwrap_or_else(|| panic!("valid entry time"));
        t.exit_time = t.entry_time + Duration::minutes(30);
        t
    }

    #[test]
    fn test_all_buckets_present_when_empty() {
        let buckets = TimeBuckets::from_trades(&[], BucketPolicy::utc());
        assert_eq!(buckets.by_hour.len(), 24);
        assert_eq!(buckets.by_weekday.len(), 7);
        assert!(buckets.by_hour.iter().all(|b| b.pnl.is_zero()));
        assert_eq!(buckets.by_weekday[0].label, "Sun");
        assert_eq!(buckets.by_hour[23].label, "23:00");
    }

    #[test]
    fn test_utc_bucketing() {
        // 2025-12-07 is a Sunday, 2025-12-10 a Wednesday.
        let trades = vec![
            entered_at("1", 10, 2025, 12, 7, 9),
            entered_at("2", -4, 2025, 12, 10, 9),
            entered_at("3", 3, 2025, 12, 10, 23),
        ];
        let buckets = TimeBuckets::from_trades(&trades, BucketPolicy::utc());

        assert_eq!(buckets.by_hour[9].pnl, Decimal::new(6, 0));
        assert_eq!(buckets.by_hour[9].trade_count, 2);
        assert_eq!(buckets.by_hour[23].pnl, Decimal::new(3, 0));
        assert_eq!(buckets.by_weekday[0].pnl, Decimal::new(10, 0));
        assert_eq!(buckets.by_weekday[3].pnl, Decimal::new(-1, 0));
    }

    #[test]
    fn test_fixed_offset_shifts_hour_and_day() {
        // Wednesday 23:15 UTC is Thursday 01:15 at UTC+2.
        let trades = vec![entered_at("1", 5, 2025, 12, 10, 23)];
        let Some(policy) = BucketPolicy::from_offset_minutes(120) else {
            panic!("+120 minutes is a valid offset");
        };
        let buckets = TimeBuckets::from_trades(&trades, policy);

        assert_eq!(buckets.by_hour[1].pnl, Decimal::new(5, 0));
        assert_eq!(buckets.by_weekday[4].pnl, Decimal::new(5, 0));
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(BucketPolicy::from_offset_minutes(24 * 60).is_none());
        assert!(BucketPolicy::from_offset_minutes(-300).is_some());
    }
}
