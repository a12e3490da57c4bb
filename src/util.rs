use chrono::{DateTime, Utc};

/// Converts seconds since Unix epoch to an UTC instant
///
/// Out of range values are mapped to the Unix epoch.
pub fn utc_timestamp_sec(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn test_utc_timestamp_sec() {
        assert_eq!(
            utc_timestamp_sec(0),
            Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            utc_timestamp_sec(1700000000),
            Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap()
        );
        assert_eq!(
            utc_timestamp_sec(-1),
            Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_utc_timestamp_sec_out_of_range() {
        assert_eq!(utc_timestamp_sec(i64::MAX), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(utc_timestamp_sec(i64::MIN), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[quickcheck]
    fn test_utc_timestamp_sec_preserves_seconds(timestamp: i32) -> bool {
        utc_timestamp_sec(timestamp.into()).timestamp() == i64::from(timestamp)
    }
}
