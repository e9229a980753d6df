//! Small parsing helpers shared across the engine.

/// Extracts the `YYYY-MM` calendar-month key from a timestamp string.
///
/// Timestamps arrive as ISO-8601 text in whatever timezone layout the upstream prefers, so the month is read from
/// the leading date characters as written rather than after converting to a common zone. Returns `None` when the
/// string does not start with a plausible `YYYY-MM`.
pub fn month_key(timestamp: &str) -> Option<String> {
    let prefix = timestamp.get(0..7)?;
    let (year, month) = prefix.split_once('-')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if month.len() != 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month_num: u8 = month.parse().ok()?;
    if !(1..=12).contains(&month_num) {
        return None;
    }
    Some(prefix.to_string())
}

#[cfg(test)]
mod test {
    use super::month_key;

    #[test]
    fn extracts_month_from_iso_timestamps() {
        assert_eq!(month_key("2024-05-14T09:30:00Z").as_deref(), Some("2024-05"));
        assert_eq!(month_key("2024-12-31T23:59:59+05:30").as_deref(), Some("2024-12"));
        assert_eq!(month_key("2023-01-01").as_deref(), Some("2023-01"));
    }

    #[test]
    fn month_is_taken_as_written_without_timezone_conversion() {
        // 31 May 23:30 in UTC-7 is already June in UTC, but the bucket stays May.
        assert_eq!(month_key("2024-05-31T23:30:00-07:00").as_deref(), Some("2024-05"));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(month_key(""), None);
        assert_eq!(month_key("2024"), None);
        assert_eq!(month_key("2024-13-01"), None);
        assert_eq!(month_key("2024-00-01"), None);
        assert_eq!(month_key("May 14, 2024"), None);
        assert_eq!(month_key("20240514"), None);
    }
}
