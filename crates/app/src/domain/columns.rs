//! Row decoding helpers shared by the repositories.

use std::{error::Error as StdError, str::FromStr};

use jiff::{Timestamp, civil::Date};
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{Row, postgres::PgRow};

use crate::domain::rentals::RentalWindow;

fn decode_error(col: &str, source: impl StdError + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(source),
    }
}

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| decode_error(col, e))
}

pub(crate) fn try_get_optional_amount(row: &PgRow, col: &str) -> Result<Option<u64>, sqlx::Error> {
    row.try_get::<Option<i64>, _>(col)?
        .map(|amount| u64::try_from(amount).map_err(|e| decode_error(col, e)))
        .transpose()
}

pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let count: i32 = row.try_get(col)?;

    u32::try_from(count).map_err(|e| decode_error(col, e))
}

pub(crate) fn try_get_enum<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let raw: String = row.try_get(col)?;

    raw.parse::<T>().map_err(|e| decode_error(col, e))
}

pub(crate) fn try_get_timestamp(row: &PgRow, col: &str) -> Result<Timestamp, sqlx::Error> {
    Ok(row.try_get::<SqlxTimestamp, _>(col)?.to_jiff())
}

pub(crate) fn try_get_optional_timestamp(
    row: &PgRow,
    col: &str,
) -> Result<Option<Timestamp>, sqlx::Error> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(col)?
        .map(SqlxTimestamp::to_jiff))
}

pub(crate) fn try_get_optional_date(row: &PgRow, col: &str) -> Result<Option<Date>, sqlx::Error> {
    Ok(row
        .try_get::<Option<SqlxDate>, _>(col)?
        .map(SqlxDate::to_jiff))
}

/// Decode a nullable `rental_start`/`rental_end` pair into a window.
pub(crate) fn try_get_rental_window(row: &PgRow) -> Result<Option<RentalWindow>, sqlx::Error> {
    let start = try_get_optional_date(row, "rental_start")?;
    let end = try_get_optional_date(row, "rental_end")?;

    match (start, end) {
        (Some(start), Some(end)) => RentalWindow::new(start, end)
            .map(Some)
            .map_err(|e| decode_error("rental_end", e)),
        _ => Ok(None),
    }
}

/// Split an optional window into bindable start and end dates.
pub(crate) fn window_dates(window: Option<&RentalWindow>) -> (Option<SqlxDate>, Option<SqlxDate>) {
    window.map_or((None, None), |window| {
        (
            Some(SqlxDate::from(window.start())),
            Some(SqlxDate::from(window.end())),
        )
    })
}

/// Convert an amount for binding into a `BIGINT` column.
pub(crate) fn amount_to_i64(col: &str, amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| decode_error(col, e))
}

/// Error raised when a stored enum column holds an unexpected value.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} \"{value}\"")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
