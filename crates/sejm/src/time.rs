use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime};

/// Converts the site's textual timestamps into Unix epoch milliseconds.
///
/// The player script (`video.js`, `dateTimeStringToNumber`) counts years
/// from 2001 instead of 1970, so the calendar year carried in the page is
/// 31 years ahead of the wall-clock year the CDN expects. The constructed
/// manifest URLs embed these values verbatim, so the subtraction has to be
/// reproduced exactly.
pub fn parse_date_time(datetime: &str) -> Result<i64> {
    let parsed = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("invalid timestamp: {datetime}"))?;
    let shifted = parsed
        .with_year(parsed.year() - 31)
        .with_context(|| format!("timestamp does not exist 31 years earlier: {datetime}"))?;

    Ok(shifted.and_utc().timestamp() * 1000)
}

#[cfg(test)]
mod tests {
    use super::parse_date_time;

    #[test]
    fn test_parse_date_time() {
        // 1991-12-13 10:45:30 UTC
        assert_eq!(parse_date_time("2022-12-13 10:45:30").unwrap(), 692621130000);
        // 1988-07-19 09:00:03 UTC
        assert_eq!(parse_date_time("2019-07-19 09:00:03").unwrap(), 585306003000);
    }

    #[test]
    fn test_parse_date_time_is_pure() {
        let first = parse_date_time("2022-12-13 10:45:30").unwrap();
        let second = parse_date_time("2022-12-13 10:45:30").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_date_time_invalid() {
        assert!(parse_date_time("13.12.2022 10:45").is_err());
        // 2032 is a leap year, 2001 is not
        assert!(parse_date_time("2032-02-29 12:00:00").is_err());
    }
}
