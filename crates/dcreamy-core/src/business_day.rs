//! # Business Day Module
//!
//! D'Creamy closes its till at 21:00 WIB, not at midnight. Everything the
//! owner reads as "today" (sales, expenses, profit) therefore runs on a
//! trading-day window from one 21:00 cutoff to the next, and this module is
//! the single source of truth for that window.
//!
//! ## The Window
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            calendar Feb 4      │      calendar Feb 5            │
//! │  ──────────────────────────────┼──────────────────────────────  │
//! │                    21:00       │              21:00             │
//! │  ───────────────────┬──────────┴───────────────┬─────────────   │
//! │                     │   one business day       │                │
//! │                     └──────────────────────────┘                │
//! │                     start (inclusive)     end (exclusive)       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A sale rung up at 22:15 on Feb 5 belongs to the business day that began
//! at 21:00 on Feb 5; a sale at 08:00 on Feb 5 belongs to the one that
//! began at 21:00 on Feb 4. An instant exactly on the cutoff belongs to the
//! new (just-started) day.
//!
//! ## Fixed offset, on purpose
//! The shop trades in WIB (UTC+7). WIB has no daylight saving and the shop
//! is not going anywhere, so local time is computed by adding a constant
//! offset to UTC. This is a business rule, not general timezone support;
//! do not replace it with a timezone-database lookup.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

use crate::{DAILY_CUTOFF_HOUR, SHOP_UTC_OFFSET_HOURS};

// =============================================================================
// BusinessDayClock
// =============================================================================

/// Computes the current trading-day window and countdown.
///
/// All operations come in two forms: a now-based convenience method
/// (`business_day_start()`) and a pure form taking an arbitrary reference
/// instant (`start_at(t)`). The pure forms make every edge case testable
/// with fixed timestamps; the convenience forms are what the application
/// calls once a minute and at the predicted reset instant.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use dcreamy_core::business_day::BusinessDayClock;
///
/// let clock = BusinessDayClock::default();
///
/// // 08:00 WIB on Feb 5 is 01:00 UTC
/// let morning = Utc.with_ymd_and_hms(2026, 2, 5, 1, 0, 0).unwrap();
///
/// // The window opened at 21:00 WIB the previous evening (14:00 UTC)
/// assert_eq!(
///     clock.start_at(morning),
///     Utc.with_ymd_and_hms(2026, 2, 4, 14, 0, 0).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessDayClock {
    /// Local wall-clock time at which the business day rolls over.
    cutoff: NaiveTime,
    /// The shop's constant UTC offset.
    offset: FixedOffset,
}

impl BusinessDayClock {
    /// Creates a clock with an explicit cutoff hour and UTC offset.
    ///
    /// Returns `None` if `cutoff_hour` is not a valid hour (0-23) or the
    /// offset is out of range. Production code uses [`Default`], which is
    /// fixed at 21:00 WIB; this constructor exists so tests can exercise
    /// other boundaries.
    pub fn new(cutoff_hour: u32, utc_offset_hours: i32) -> Option<Self> {
        let cutoff = NaiveTime::from_hms_opt(cutoff_hour, 0, 0)?;
        let offset = FixedOffset::east_opt(utc_offset_hours.checked_mul(3600)?)?;
        Some(BusinessDayClock { cutoff, offset })
    }

    /// The hour (24h, local time) at which the day rolls over.
    #[inline]
    pub fn cutoff_hour(&self) -> u32 {
        self.cutoff.hour()
    }

    /// The shop's fixed UTC offset.
    #[inline]
    pub fn utc_offset(&self) -> FixedOffset {
        self.offset
    }

    // -------------------------------------------------------------------------
    // Pure operations over a reference instant
    // -------------------------------------------------------------------------

    /// Shifts an instant into the shop's fixed offset.
    #[inline]
    pub fn local_time_at(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    /// The most recent cutoff occurrence at or before `instant`, in UTC.
    ///
    /// If the local time is before the cutoff, the window opened at
    /// yesterday's cutoff; otherwise at today's. An instant exactly on the
    /// cutoff is the start of the new day, so `start_at(t) == t` there.
    pub fn start_at(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let local = self.local_time_at(instant).naive_local();

        let cutoff_today = local.date().and_time(self.cutoff);
        let boundary = if local.time() < self.cutoff {
            cutoff_today - Duration::days(1)
        } else {
            cutoff_today
        };

        self.local_naive_to_utc(boundary)
    }

    /// `start_at(instant) + 24h`; the exclusive upper bound of the window.
    pub fn end_at(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        self.start_at(instant) + Duration::hours(24)
    }

    /// The calendar date (local shop time) the business day is named after.
    ///
    /// Once local time passes the cutoff the label is tomorrow's calendar
    /// date, because that is the day that has just begun trading; before
    /// the cutoff it is today's. Rendered with `Display` this is the
    /// `YYYY-MM-DD` string stored against daily reports.
    pub fn label_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        let local = self.local_time_at(instant).naive_local();

        if local.time() >= self.cutoff {
            (local + Duration::days(1)).date()
        } else {
            local.date()
        }
    }

    /// Non-negative milliseconds from `instant` until the next cutoff.
    ///
    /// Strictly decreases as the clock advances inside a business day and
    /// jumps back to just under 24 hours immediately after the cutoff.
    pub fn ms_until_reset_at(&self, instant: DateTime<Utc>) -> i64 {
        let local = self.local_time_at(instant).naive_local();

        let mut next_reset = local.date().and_time(self.cutoff);
        if local >= next_reset {
            next_reset += Duration::days(1);
        }

        (next_reset - local).num_milliseconds()
    }

    /// Renders the time remaining until the next cutoff.
    ///
    /// `"H jam M menit lagi"` while at least one full hour remains, else
    /// `"M menit lagi"`. Hours and minutes are floored, never rounded, so
    /// at 59 minutes 59 seconds out this still reads `"59 menit lagi"`.
    pub fn format_countdown_at(&self, instant: DateTime<Utc>) -> String {
        let ms = self.ms_until_reset_at(instant);
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;

        if hours == 0 {
            format!("{} menit lagi", minutes)
        } else {
            format!("{} jam {} menit lagi", hours, minutes)
        }
    }

    /// True iff `instant` falls inside the business day containing
    /// `reference`: `start <= instant < end`.
    pub fn is_within_business_day_of(
        &self,
        reference: DateTime<Utc>,
        instant: DateTime<Utc>,
    ) -> bool {
        let start = self.start_at(reference);
        let end = start + Duration::hours(24);
        start <= instant && instant < end
    }

    /// The `(start, end)` window containing `reference`, for historical
    /// report boundaries. `end` is exclusive and always exactly 24 hours
    /// after `start`.
    pub fn business_day_range_for(&self, reference: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start_at(reference);
        (start, start + Duration::hours(24))
    }

    // -------------------------------------------------------------------------
    // Now-based convenience wrappers
    // -------------------------------------------------------------------------

    /// The present instant in shop local time.
    pub fn current_local_time(&self) -> DateTime<FixedOffset> {
        self.local_time_at(Utc::now())
    }

    /// Start of the current business day, in UTC.
    pub fn business_day_start(&self) -> DateTime<Utc> {
        self.start_at(Utc::now())
    }

    /// Exclusive end of the current business day, in UTC.
    pub fn business_day_end(&self) -> DateTime<Utc> {
        self.end_at(Utc::now())
    }

    /// Label of the current business day.
    pub fn business_day_label(&self) -> NaiveDate {
        self.label_at(Utc::now())
    }

    /// Milliseconds until the next daily reset.
    pub fn ms_until_reset(&self) -> i64 {
        self.ms_until_reset_at(Utc::now())
    }

    /// Human-readable countdown until the next daily reset.
    pub fn format_countdown(&self) -> String {
        self.format_countdown_at(Utc::now())
    }

    /// True iff `instant` falls inside the current business day.
    pub fn is_within_current_business_day(&self, instant: DateTime<Utc>) -> bool {
        self.is_within_business_day_of(Utc::now(), instant)
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    /// Reinterprets a shop-local wall-clock time as UTC.
    fn local_naive_to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let offset = Duration::seconds(i64::from(self.offset.local_minus_utc()));
        DateTime::<Utc>::from_naive_utc_and_offset(local - offset, Utc)
    }
}

/// The production clock: cutoff 21:00, WIB (UTC+7).
impl Default for BusinessDayClock {
    fn default() -> Self {
        BusinessDayClock::new(DAILY_CUTOFF_HOUR, SHOP_UTC_OFFSET_HOURS)
            .expect("shop cutoff constants are valid")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> BusinessDayClock {
        BusinessDayClock::default()
    }

    /// 08:00 WIB == 01:00 UTC, same calendar date.
    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_pre_cutoff_window_started_yesterday() {
        // 2026-02-05 08:00 WIB
        let morning = utc(2026, 2, 5, 1, 0, 0);

        // Window opened 2026-02-04 21:00 WIB = 14:00 UTC
        assert_eq!(clock().start_at(morning), utc(2026, 2, 4, 14, 0, 0));
        assert_eq!(clock().end_at(morning), utc(2026, 2, 5, 14, 0, 0));
        assert_eq!(clock().label_at(morning).to_string(), "2026-02-05");
    }

    #[test]
    fn test_post_cutoff_window_started_today() {
        // 2026-02-05 22:00 WIB
        let evening = utc(2026, 2, 5, 15, 0, 0);

        // Window opened 2026-02-05 21:00 WIB = 14:00 UTC
        assert_eq!(clock().start_at(evening), utc(2026, 2, 5, 14, 0, 0));
        // The day that has just begun trading is labeled with tomorrow's date
        assert_eq!(clock().label_at(evening).to_string(), "2026-02-06");
    }

    #[test]
    fn test_boundary_instant_belongs_to_new_day() {
        // Exactly 21:00:00 WIB on 2026-02-05
        let boundary = utc(2026, 2, 5, 14, 0, 0);

        assert_eq!(clock().start_at(boundary), boundary);
        assert_eq!(clock().label_at(boundary).to_string(), "2026-02-06");

        // One second earlier still belongs to the old day
        let just_before = utc(2026, 2, 5, 13, 59, 59);
        assert_eq!(clock().start_at(just_before), utc(2026, 2, 4, 14, 0, 0));
        assert_eq!(clock().label_at(just_before).to_string(), "2026-02-05");
    }

    #[test]
    fn test_window_is_always_exactly_24_hours() {
        let instants = [
            utc(2026, 2, 5, 1, 0, 0),
            utc(2026, 2, 5, 13, 59, 59),
            utc(2026, 2, 5, 14, 0, 0),
            utc(2026, 2, 28, 23, 30, 0),
            utc(2026, 12, 31, 18, 0, 0),
            utc(2027, 1, 1, 2, 0, 0),
        ];

        for instant in instants {
            let (start, end) = clock().business_day_range_for(instant);
            assert_eq!(end - start, Duration::hours(24), "at {}", instant);
        }
    }

    #[test]
    fn test_countdown_decreases_and_resets() {
        // 08:00 WIB: 13 hours to the 21:00 cutoff
        let morning = utc(2026, 2, 5, 1, 0, 0);
        assert_eq!(clock().ms_until_reset_at(morning), 13 * 3_600_000);

        // Five minutes later the countdown has shrunk by exactly five minutes
        let later = utc(2026, 2, 5, 1, 5, 0);
        assert_eq!(
            clock().ms_until_reset_at(morning) - clock().ms_until_reset_at(later),
            5 * 60_000
        );

        // Exactly at the cutoff, the next reset is a full day away
        let boundary = utc(2026, 2, 5, 14, 0, 0);
        assert_eq!(clock().ms_until_reset_at(boundary), 24 * 3_600_000);

        // One second past the cutoff it is a second under a day
        let just_after = utc(2026, 2, 5, 14, 0, 1);
        assert_eq!(clock().ms_until_reset_at(just_after), 24 * 3_600_000 - 1_000);
    }

    #[test]
    fn test_format_countdown() {
        // 19:30 WIB: 1h30m remaining
        assert_eq!(
            clock().format_countdown_at(utc(2026, 2, 5, 12, 30, 0)),
            "1 jam 30 menit lagi"
        );

        // 20:15 WIB: under an hour drops the jam segment
        assert_eq!(
            clock().format_countdown_at(utc(2026, 2, 5, 13, 15, 0)),
            "45 menit lagi"
        );

        // Truncation floors: 59m30s reads as 59 minutes
        assert_eq!(
            clock().format_countdown_at(utc(2026, 2, 5, 13, 0, 30)),
            "59 menit lagi"
        );

        // 08:00 WIB: 13 hours out
        assert_eq!(
            clock().format_countdown_at(utc(2026, 2, 5, 1, 0, 0)),
            "13 jam 0 menit lagi"
        );
    }

    #[test]
    fn test_is_within_business_day_inclusive_start_exclusive_end() {
        let reference = utc(2026, 2, 5, 1, 0, 0);
        let c = clock();
        let (start, end) = c.business_day_range_for(reference);

        assert!(c.is_within_business_day_of(reference, start));
        assert!(c.is_within_business_day_of(reference, start + Duration::hours(12)));
        assert!(!c.is_within_business_day_of(reference, end));
        assert!(!c.is_within_business_day_of(reference, start - Duration::seconds(1)));
    }

    #[test]
    fn test_range_for_historical_report() {
        // A report for the evening of Feb 5 and the morning of Feb 6 shares
        // one window
        let late_sale = utc(2026, 2, 5, 16, 30, 0); // 23:30 WIB Feb 5
        let early_sale = utc(2026, 2, 6, 3, 0, 0); // 10:00 WIB Feb 6

        let (start, _) = clock().business_day_range_for(late_sale);
        assert_eq!(start, utc(2026, 2, 5, 14, 0, 0));
        assert!(clock().is_within_business_day_of(late_sale, early_sale));
    }

    #[test]
    fn test_custom_cutoff_clock() {
        // A midnight-cutoff clock windows on plain calendar days
        let midnight = BusinessDayClock::new(0, 7).unwrap();
        let noon = utc(2026, 2, 5, 5, 0, 0); // 12:00 WIB
        assert_eq!(midnight.start_at(noon), utc(2026, 2, 4, 17, 0, 0));
        assert_eq!(midnight.end_at(noon), utc(2026, 2, 5, 17, 0, 0));

        assert!(BusinessDayClock::new(24, 7).is_none());
    }

    #[test]
    fn test_local_time_shift() {
        let instant = utc(2026, 2, 5, 1, 0, 0);
        let local = clock().local_time_at(instant);
        assert_eq!(local.naive_local(), utc(2026, 2, 5, 8, 0, 0).naive_utc());
    }
}
