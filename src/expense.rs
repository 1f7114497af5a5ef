//! This file defines the `Expense` type, the validated name newtype and
//! the database functions for storing, listing and deleting expenses.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Category, Error};

/// The display label of an expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ExpenseName(String);

impl ExpenseName {
    /// Create an expense name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyExpenseName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyExpenseName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create an expense name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ExpenseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ExpenseName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseName::new(s)
    }
}

impl Display for ExpenseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The row ID of an expense in the application database.
pub type ExpenseId = i64;

/// A single recorded spending event owned by one account.
///
/// Expenses are immutable once created: there is no update operation,
/// only [create_expense] and [delete_expense].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,

    /// The username of the account that recorded this expense.
    ///
    /// This is an advisory reference to `users.username`: the table does
    /// not enforce it with a constraint.
    pub username: String,

    /// A free-text label for the expense.
    ///
    /// `None` for rows written before the `name` column existed (see
    /// [crate::initialize]).
    pub name: Option<ExpenseName>,

    /// Which spending category the expense belongs to.
    pub category: Category,

    /// The amount of money spent.
    pub amount: f64,

    /// The calendar date the expense was made.
    pub date: Date,
}

/// Validate and insert a new expense row for `username`.
///
/// Validation happens here rather than in the caller: an empty or
/// whitespace-only `name` or a non-positive `amount` rejects the request
/// and writes nothing. On success the stored row is returned with its
/// freshly assigned ID.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyExpenseName] if `name` is empty after trimming,
/// - [Error::NonPositiveAmount] if `amount` is zero or negative,
/// - [Error::SqlError] if there is some other SQL error.
pub fn create_expense(
    username: &str,
    name: &str,
    category: Category,
    amount: f64,
    date: Date,
    connection: &Connection,
) -> Result<Expense, Error> {
    let name = ExpenseName::new(name)?;

    if amount <= 0.0 {
        return Err(Error::NonPositiveAmount(amount));
    }

    let expense = connection
        .prepare(
            "INSERT INTO expenses (username, name, category, amount, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, username, name, category, amount, date",
        )?
        .query_row(
            (username, name.as_ref(), category, amount, date),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve every expense recorded by `username`, in insertion order.
///
/// The order is the order rows were stored in, not sorted by date.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_expenses(username: &str, connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, username, name, category, amount, date FROM expenses
             WHERE username = :username",
        )?
        .query_map(&[(":username", &username)], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
        .collect()
}

/// Delete the expense with `id` if it exists.
///
/// Deleting an ID that is not in the database is a successful no-op.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expenses WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        tracing::debug!("delete_expense: no expense with id {id}");
    }

    Ok(())
}

/// Get the total number of expense rows in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn count_expenses(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| {
            row.get::<_, i64>(0).map(|count| count as usize)
        })
        .map_err(|error| error.into())
}

/// Create the `expenses` table in the database.
///
/// The `username` column is deliberately unconstrained to stay
/// compatible with existing data files.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT,
                name TEXT,
                category TEXT,
                amount REAL,
                date TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let username = row.get(1)?;
    let raw_name: Option<String> = row.get(2)?;
    let category = row.get(3)?;
    let amount = row.get(4)?;
    let date = row.get(5)?;

    let name = raw_name.map(|name| ExpenseName::new_unchecked(&name));

    Ok(Expense {
        id,
        username,
        name,
        category,
        amount,
        date,
    })
}
