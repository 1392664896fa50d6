//! Timezone handling for "today".
//!
//! The year and month dropdowns preselect the current year or month. What
//! "current" means depends on the administrator's timezone, which is
//! activated per thread as a fixed offset from UTC.

use std::cell::RefCell;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

thread_local! {
    /// Seconds east of UTC. `None` means UTC.
    static CURRENT_TIMEZONE: RefCell<Option<i32>> = const { RefCell::new(None) };
}

/// Activates a timezone offset (seconds east of UTC) for the current thread.
///
/// Offsets outside ±24h are ignored by [`get_current_timezone`].
pub fn activate_timezone(offset_seconds: i32) {
    CURRENT_TIMEZONE.with(|cell| {
        *cell.borrow_mut() = Some(offset_seconds);
    });
}

/// Deactivates the current thread's timezone, reverting to UTC.
pub fn deactivate_timezone() {
    CURRENT_TIMEZONE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Returns the current thread's timezone offset in seconds east of UTC.
pub fn get_current_timezone_offset() -> i32 {
    active_timezone_offset().unwrap_or(0)
}

/// Returns the offset activated on the current thread, or `None` when no
/// timezone has been activated.
pub fn active_timezone_offset() -> Option<i32> {
    CURRENT_TIMEZONE.with(|cell| *cell.borrow())
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Returns the current timezone as a `FixedOffset`.
pub fn get_current_timezone() -> FixedOffset {
    FixedOffset::east_opt(get_current_timezone_offset()).unwrap_or_else(utc)
}

/// Returns the current instant in UTC.
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&utc())
}

/// Converts a datetime to the current thread's active timezone.
///
/// ```
/// use give_rs_core::i18n::timezone;
/// use chrono::{Datelike, FixedOffset, TimeZone};
///
/// let utc = FixedOffset::east_opt(0).unwrap();
/// let dt = utc.with_ymd_and_hms(2023, 12, 31, 23, 30, 0).unwrap();
///
/// timezone::activate_timezone(3600);
/// assert_eq!(timezone::localtime(&dt).year(), 2024);
/// timezone::deactivate_timezone();
/// ```
pub fn localtime(dt: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    dt.with_timezone(&get_current_timezone())
}

/// Returns today's date in the current thread's active timezone.
pub fn today() -> NaiveDate {
    localtime(&now()).date_naive()
}

/// Returns today's date at a fixed offset, ignoring the thread's timezone.
///
/// An out-of-range offset is treated as UTC.
pub fn today_with_offset(offset_seconds: i32) -> NaiveDate {
    let tz = FixedOffset::east_opt(offset_seconds).unwrap_or_else(utc);
    now().with_timezone(&tz).date_naive()
}
