//! Cart Items

mod handlers;

use jiff::civil::Date;
use salvo::http::StatusError;

use stylus_app::domain::rentals::RentalWindow;

use crate::extensions::*;

pub(crate) use handlers::*;

/// Parses the optional `rental_start` / `rental_end` pair of a request.
pub(crate) fn rental_window(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<RentalWindow>, StatusError> {
    let (start, end) = match (start, end) {
        (None, None) => return Ok(None),
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(StatusError::bad_request()
                .brief("rental_start and rental_end must be given together"));
        }
    };

    let start = start
        .parse::<Date>()
        .or_400("rental_start must be a YYYY-MM-DD date")?;
    let end = end
        .parse::<Date>()
        .or_400("rental_end must be a YYYY-MM-DD date")?;

    RentalWindow::new(start, end)
        .or_400("invalid rental window")
        .map(Some)
}
