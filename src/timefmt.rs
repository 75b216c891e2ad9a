use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Wall-clock layouts found in chat exports, interpreted in the export's zone.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Format an instant as an ISO-8601 UTC string with millisecond precision.
///
/// The fixed width makes lexicographic order match chronological order.
pub fn format_iso(datetime: DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Parse an export date into an absolute instant.
///
/// Accepts RFC 3339 with an explicit offset, a bare `YYYY-MM-DD` (midnight
/// UTC), or a naive date-time which is read as wall-clock time in `tz`.
/// Wall-clock times skipped by a DST transition are moved forward one hour.
pub fn parse_export_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return resolve_local(&naive, tz);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn resolve_local<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(*naive + Duration::hours(1))).earliest())
        .map(|datetime| datetime.with_timezone(&Utc))
}

/// Parse a canonical ISO timestamp and view it in `tz`.
pub fn parse_iso_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::parse_from_rfc3339(iso)
        .ok()
        .map(|datetime| datetime.with_timezone(tz))
}
