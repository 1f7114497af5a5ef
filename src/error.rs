//! Defines the crate level error type and its conversion from SQL errors.

/// The errors that may occur in the expense tracker core.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid combination of username and password.
    ///
    /// An unknown username and a wrong password deliberately produce the
    /// same error so a caller cannot probe which usernames exist.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// An empty string was used to create an expense name.
    #[error("Expense name cannot be empty")]
    EmptyExpenseName,

    /// A zero or negative amount was used to create an expense.
    ///
    /// Expenses record money that was spent, so the amount must be
    /// greater than zero.
    #[error("{0} is not a positive amount")]
    NonPositiveAmount(f64),

    /// A string that is not one of the known category names.
    #[error("\"{0}\" is not a known category")]
    InvalidCategory(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The CSV output could not be written.
    #[error("could not write CSV: {0}")]
    CsvError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
