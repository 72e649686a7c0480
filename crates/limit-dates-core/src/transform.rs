use polars::prelude::*;

use crate::dates::coerce_limit_dates;
use crate::error::{LimitDatesError, Result};
use crate::schema::{LIMIT_BEGIN_DATE, LIMIT_DATE_COLUMNS, ROW_INDEX_COLUMN};

/// Deduplicated limit dates for a single jurisdiction.
#[derive(Debug, Clone)]
pub struct LimitDates {
    /// Row index column followed by [`LIMIT_DATE_COLUMNS`].
    pub frame: DataFrame,
    pub input_rows: usize,
    pub unparseable_dates: usize,
}

impl LimitDates {
    pub fn output_rows(&self) -> usize {
        self.frame.height()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.input_rows - self.frame.height()
    }
}

/// Required columns absent from `df`, in output order.
pub fn missing_columns(df: &DataFrame) -> Vec<String> {
    LIMIT_DATE_COLUMNS
        .iter()
        .filter(|name| df.get_column_index(name).is_none())
        .map(|name| name.to_string())
        .collect()
}

/// Projects a DMR table onto the limit date columns, coerces the begin date and
/// drops repeated rows, keeping the first occurrence of each.
pub fn limit_dates_frame(df: DataFrame) -> Result<LimitDates> {
    let missing = missing_columns(&df);
    if !missing.is_empty() {
        return Err(LimitDatesError::MissingColumns { missing });
    }

    let input_rows = df.height();

    // The index records source positions, so it is attached before any rows are dropped.
    let mut indexed = df
        .select(LIMIT_DATE_COLUMNS)?
        .with_row_index(ROW_INDEX_COLUMN.into(), None)?;

    let coerced = coerce_limit_dates(indexed.column(LIMIT_BEGIN_DATE)?)?;
    indexed.with_column(coerced.series)?;

    let key: Vec<String> = LIMIT_DATE_COLUMNS.iter().map(|name| name.to_string()).collect();
    let frame = indexed.unique_stable(Some(key.as_slice()), UniqueKeepStrategy::First, None)?;

    Ok(LimitDates {
        frame,
        input_rows,
        unparseable_dates: coerced.unparseable,
    })
}
