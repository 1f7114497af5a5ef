//! CSV export of an account's expense history.

use std::io::Write;

use rusqlite::Connection;

use crate::{Error, Expense, expense::get_expenses};

/// Write `expenses` as CSV with the header `Name,Category,Amount,Date`.
///
/// Rows are written in the order given, so output produced from
/// [get_expenses] matches what the shell is displaying at
/// call time. Rows that predate the `name` column are written with an
/// empty name field.
///
/// # Errors
/// Returns an [Error::CsvError] if a record could not be written.
pub fn write_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer
        .write_record(["Name", "Category", "Amount", "Date"])
        .map_err(|error| Error::CsvError(error.to_string()))?;

    for expense in expenses {
        let name = expense
            .name
            .as_ref()
            .map(|name| name.to_string())
            .unwrap_or_default();

        writer
            .write_record([
                name,
                expense.category.to_string(),
                expense.amount.to_string(),
                expense.date.to_string(),
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    writer
        .flush()
        .map_err(|error| Error::CsvError(error.to_string()))
}

/// Fetch `username`'s expenses and render them as a CSV byte stream,
/// ready for the shell's download action.
///
/// # Errors
/// This function will return a:
/// - [Error::SqlError] if the expenses could not be read,
/// - [Error::CsvError] if the output could not be written.
pub fn export_csv(username: &str, connection: &Connection) -> Result<Vec<u8>, Error> {
    let expenses = get_expenses(username, connection)?;

    let mut buffer = Vec::new();
    write_expenses_csv(&expenses, &mut buffer)?;

    Ok(buffer)
}
