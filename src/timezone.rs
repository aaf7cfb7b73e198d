use time::OffsetDateTime;
use time_tz::{Offset, TimeZone, Tz};

/// Look up a timezone by its canonical name, e.g. "Pacific/Auckland".
pub fn get_timezone(canonical_timezone: &str) -> Option<&'static Tz> {
    time_tz::timezones::get_by_name(canonical_timezone)
}

/// Express `timestamp` in the offset `timezone` had at that instant.
///
/// The offset is resolved per timestamp so that dates either side of a
/// daylight saving transition land on the right calendar day.
pub fn to_local_time(timestamp: OffsetDateTime, timezone: &Tz) -> OffsetDateTime {
    timestamp.to_offset(timezone.get_offset_utc(&timestamp).to_utc())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{get_timezone, to_local_time};

    #[test]
    fn unknown_timezone_is_none() {
        assert!(get_timezone("Mars/Olympus_Mons").is_none());
    }

    #[test]
    fn converts_to_local_calendar_day() {
        let timezone = get_timezone("Pacific/Auckland").unwrap();
        // 11:00 UTC on the last day of March is already April in Auckland (NZDT, +13).
        let local = to_local_time(datetime!(2025-03-31 11:00 UTC), timezone);

        assert_eq!(local.month(), time::Month::April);
        assert_eq!(local.day(), 1);
    }

    #[test]
    fn respects_daylight_saving() {
        let timezone = get_timezone("Pacific/Auckland").unwrap();
        // NZST (+12) applies in winter.
        let local = to_local_time(datetime!(2025-07-01 00:00 UTC), timezone);

        assert_eq!(local.offset().whole_hours(), 12);
    }
}
