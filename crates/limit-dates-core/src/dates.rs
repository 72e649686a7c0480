use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

static DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%y", "%d-%b-%Y"];

static DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Result of coercing a limit begin date column.
#[derive(Debug, Clone)]
pub struct DateCoercion {
    pub series: Series,
    /// Non-empty values that could not be read as a date and became null.
    pub unparseable: usize,
}

/// Parses a single limit begin date. Returns `None` for anything that is not
/// a recognisable date, including dates outside the nanosecond timestamp
/// range (roughly 1677-09-21 to 2262-04-11).
pub fn parse_limit_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .or_else(|| parse_compact_date(trimmed))
                .map(|date| date.and_time(NaiveTime::MIN))
        })?;

    parsed.and_utc().timestamp_nanos_opt().map(|_| parsed)
}

// YYYYMMDD with no separators.
fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Converts a column of date strings into a temporal series, nulling anything
/// unparseable. The result is `Date` when every value falls on midnight and a
/// millisecond `Datetime` otherwise.
pub fn coerce_limit_dates(column: &Column) -> PolarsResult<DateCoercion> {
    let name = column.name().clone();
    let as_text = column.cast(&DataType::String)?;
    let values = as_text.str()?;

    let mut parsed: Vec<Option<NaiveDateTime>> = Vec::with_capacity(values.len());
    let mut unparseable = 0usize;

    for value in values.into_iter() {
        let raw = value.map(str::trim).filter(|v| !v.is_empty());
        let timestamp = raw.and_then(parse_limit_date);
        if raw.is_some() && timestamp.is_none() {
            unparseable += 1;
        }
        parsed.push(timestamp);
    }

    let date_only = parsed
        .iter()
        .flatten()
        .all(|timestamp| timestamp.time() == NaiveTime::MIN);

    let series = if date_only {
        let epoch = DateTime::UNIX_EPOCH.date_naive();
        let days: Vec<Option<i32>> = parsed
            .iter()
            .map(|timestamp| {
                timestamp.map(|ts| ts.date().signed_duration_since(epoch).num_days() as i32)
            })
            .collect();
        Series::new(name, days).cast(&DataType::Date)?
    } else {
        let millis: Vec<Option<i64>> = parsed
            .iter()
            .map(|timestamp| timestamp.map(|ts| ts.and_utc().timestamp_millis()))
            .collect();
        Series::new(name, millis).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
    };

    Ok(DateCoercion {
        series,
        unparseable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn parses_common_dmr_date_layouts() {
        let expected = ymd(2020, 1, 31);
        for value in [
            "2020-01-31",
            "2020/01/31",
            "01/31/2020",
            "31-JAN-2020",
            "31-jan-20",
            "20200131",
            " 2020-01-31 ",
            "2020-01-31 00:00:00",
            "2020-01-31T00:00:00.000",
        ] {
            assert_eq!(parse_limit_date(value), Some(expected), "value {value:?}");
        }
    }

    #[test]
    fn keeps_time_of_day() {
        let parsed = parse_limit_date("2019-06-01 13:45:00").expect("datetime");
        assert_eq!(parsed.to_string(), "2019-06-01 13:45:00");
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        for value in ["", "   ", "not-a-date", "bad-date", "2020-02-30", "13/01/2020", "2020013"] {
            assert_eq!(parse_limit_date(value), None, "value {value:?}");
        }
    }

    #[test]
    fn rejects_dates_outside_timestamp_range() {
        assert_eq!(parse_limit_date("9999-12-31"), None);
        assert_eq!(parse_limit_date("12/31/1600"), None);
        assert!(parse_limit_date("2262-04-11").is_some());
        assert!(parse_limit_date("1677-09-22").is_some());
    }

    #[test]
    fn coercion_counts_unparseable_but_not_empty_values() -> PolarsResult<()> {
        let column = Column::new(
            "limit_begin_date".into(),
            [Some("2020-01-01"), Some("bad-date"), None, Some(""), Some("01/02/2021")],
        );

        let coerced = coerce_limit_dates(&column)?;
        assert_eq!(coerced.unparseable, 1);
        assert_eq!(coerced.series.dtype(), &DataType::Date);
        assert_eq!(coerced.series.name().as_str(), "limit_begin_date");
        assert_eq!(coerced.series.null_count(), 3);

        let text = coerced.series.cast(&DataType::String)?;
        let text = text.str()?;
        assert_eq!(text.get(0), Some("2020-01-01"));
        assert_eq!(text.get(4), Some("2021-01-02"));
        Ok(())
    }

    #[test]
    fn coercion_switches_to_datetime_when_times_present() -> PolarsResult<()> {
        let column = Column::new(
            "limit_begin_date".into(),
            ["2020-01-01", "2020-01-02 06:30:00"],
        );

        let coerced = coerce_limit_dates(&column)?;
        assert_eq!(
            coerced.series.dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, None)
        );
        assert_eq!(coerced.unparseable, 0);
        Ok(())
    }
}
