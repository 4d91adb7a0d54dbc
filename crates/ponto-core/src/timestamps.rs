//! Provider timestamp formats.
//!
//! The provider expects wall-clock time in a fixed UTC-03:00 civil timezone
//! (no daylight saving), never process-local time and never raw UTC — a UTC
//! timestamp is three hours off and gets rejected.
//!
//! Two fixed-width formats exist:
//!
//! - `created`: `YYYYMMDDHHmmssSSS`, 17 digits, milliseconds. Sent with every
//!   action type.
//! - `rrn`: `YYYYMMDDHHmmssCC`, 16 digits, centiseconds (ms / 10). Sent only
//!   with sales (actionType 4) and cashback (actionType 8). A balance query
//!   (actionType 3) carrying an rrn is rejected upstream with code 71.
//!
//! Some date platforms render midnight as hour "24" instead of "00", which
//! the provider rejects (again code 71). The hour field is therefore coerced
//! from 24 to 0 before formatting, keeping the digit-width contract intact
//! regardless of the conversion backend.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

/// The provider's civil timezone: UTC-03:00, no daylight saving.
const PROVIDER_UTC_OFFSET_SECS: i32 = -3 * 3600;

struct CivilTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
}

fn civil_components(now: DateTime<Utc>) -> CivilTime {
    let offset = FixedOffset::east_opt(PROVIDER_UTC_OFFSET_SECS).expect("offset within bounds");
    let local = now.with_timezone(&offset);

    // Hour 24 means midnight on platforms with the 24:00 rendering quirk.
    let mut hour = local.hour();
    if hour == 24 {
        hour = 0;
    }

    CivilTime {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        hour,
        minute: local.minute(),
        second: local.second(),
        millisecond: local.timestamp_subsec_millis(),
    }
}

/// Current `created` timestamp: 17 digits, `YYYYMMDDHHmmssSSS`.
#[must_use]
pub fn created_timestamp() -> String {
    created_timestamp_at(Utc::now())
}

/// The `created` timestamp for a given instant. Exposed for deterministic
/// callers; production code uses [`created_timestamp`].
#[must_use]
pub fn created_timestamp_at(now: DateTime<Utc>) -> String {
    let t = civil_components(now);
    format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}{:03}",
        t.year, t.month, t.day, t.hour, t.minute, t.second, t.millisecond
    )
}

/// Current RRN (Reference Retrieval Number): 16 digits, `YYYYMMDDHHmmssCC`.
///
/// The trailing field is centiseconds, not milliseconds: the RRN format is
/// one digit narrower than `created`. Resolution is one centisecond with no
/// sequence component, so rapid submissions from one terminal can collide;
/// that is a provider-contract limitation, not something to paper over here.
#[must_use]
pub fn rrn() -> String {
    rrn_at(Utc::now())
}

/// The RRN for a given instant. Exposed for deterministic callers.
#[must_use]
pub fn rrn_at(now: DateTime<Utc>) -> String {
    let t = civil_components(now);
    format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}{:02}",
        t.year,
        t.month,
        t.day,
        t.hour,
        t.minute,
        t.second,
        t.millisecond / 10
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn all_digits(s: &str) -> bool {
        s.bytes().all(|b| b.is_ascii_digit())
    }

    #[test]
    fn created_is_seventeen_digits() {
        let ts = created_timestamp();
        assert_eq!(ts.len(), 17);
        assert!(all_digits(&ts));
    }

    #[test]
    fn rrn_is_sixteen_digits() {
        let ts = rrn();
        assert_eq!(ts.len(), 16);
        assert!(all_digits(&ts));
    }

    #[test]
    fn known_instant_formats_exactly() {
        // 2025-11-18 18:30:45.789 UTC = 15:30:45.789 at UTC-03:00.
        let instant = Utc.with_ymd_and_hms(2025, 11, 18, 18, 30, 45).unwrap()
            + chrono::Duration::milliseconds(789);
        assert_eq!(created_timestamp_at(instant), "20251118153045789");
        assert_eq!(rrn_at(instant), "2025111815304578");
    }

    #[test]
    fn midnight_renders_hour_zero() {
        // 03:20:38 UTC is exactly 00:20:38 at UTC-03:00 — the instant the
        // hour-24 rendering quirk bites on affected platforms.
        let instant = Utc.with_ymd_and_hms(2025, 11, 18, 3, 20, 38).unwrap()
            + chrono::Duration::milliseconds(709);
        let created = created_timestamp_at(instant);
        assert_eq!(created, "20251118002038709");
        assert!(!created[8..10].contains("24"));
        assert_eq!(rrn_at(instant), "2025111800203870");
    }

    #[test]
    fn hour_field_never_24() {
        // Sweep a full day of hours; the HH field must stay in 00..=23.
        for h in 0..24 {
            let instant = Utc.with_ymd_and_hms(2025, 6, 1, h, 0, 0).unwrap();
            let created = created_timestamp_at(instant);
            let hour: u32 = created[8..10].parse().unwrap();
            assert!(hour < 24, "hour {hour} in {created}");
        }
    }

    #[test]
    fn date_shifts_across_utc_midnight() {
        // 01:00 UTC on the 19th is still 22:00 on the 18th in provider time.
        let instant = Utc.with_ymd_and_hms(2025, 11, 19, 1, 0, 0).unwrap();
        assert!(created_timestamp_at(instant).starts_with("20251118"));
    }

    #[test]
    fn centiseconds_truncate_not_round() {
        let instant = Utc.with_ymd_and_hms(2025, 11, 18, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(999);
        assert!(rrn_at(instant).ends_with("99"));
        let instant = Utc.with_ymd_and_hms(2025, 11, 18, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(9);
        assert!(rrn_at(instant).ends_with("00"));
    }
}
