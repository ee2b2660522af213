use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parses the `since` query parameter.
///
/// Accepts RFC 3339 timestamps, date-times without an offset and plain
/// dates. Values without an offset are taken as UTC, plain dates as midnight.
pub fn parse_since(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    // Form decoding turns an unencoded `+02:00` into ` 02:00`
    if let Some((time, offset)) = value.rsplit_once(' ') {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&format!("{time}+{offset}")) {
            return Some(timestamp.with_timezone(&Utc));
        }
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn rfc3339() {
        assert_eq!(
            parse_since("2024-05-01T10:00:00Z"),
            Some(utc(2024, 5, 1, 10, 0, 0))
        );
        assert_eq!(
            parse_since("2024-05-01T10:00:00.000Z"),
            Some(utc(2024, 5, 1, 10, 0, 0))
        );
        assert_eq!(
            parse_since("2024-05-01T12:00:00+02:00"),
            Some(utc(2024, 5, 1, 10, 0, 0))
        );
    }

    #[test]
    fn offset_with_decoded_plus() {
        assert_eq!(
            parse_since("2024-05-01T12:00:00 02:00"),
            Some(utc(2024, 5, 1, 10, 0, 0))
        );
        assert_eq!(
            parse_since("2024-05-01T12:00:00.5 00:00"),
            parse_since("2024-05-01T12:00:00.5Z")
        );
        assert_eq!(parse_since("2024-05-01T12:00:00 99"), None);
    }

    #[test]
    fn without_offset() {
        assert_eq!(
            parse_since("2024-05-01T10:30"),
            Some(utc(2024, 5, 1, 10, 30, 0))
        );
        assert_eq!(
            parse_since("2024-05-01T10:30:15"),
            Some(utc(2024, 5, 1, 10, 30, 15))
        );
        assert_eq!(
            parse_since("2024-05-01 10:30:15"),
            Some(utc(2024, 5, 1, 10, 30, 15))
        );
    }

    #[test]
    fn date_only() {
        assert_eq!(parse_since("2024-05-01"), Some(utc(2024, 5, 1, 0, 0, 0)));
        assert_eq!(parse_since(" 2024-05-01 "), Some(utc(2024, 5, 1, 0, 0, 0)));
    }

    #[test]
    fn invalid() {
        assert_eq!(parse_since("yesterday"), None);
        assert_eq!(parse_since("2024-13-01"), None);
        assert_eq!(parse_since(""), None);
    }
}
