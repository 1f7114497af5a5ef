//! The closed set of spending categories an expense can belong to.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A spending category, e.g. for grouping expenses in a bar or pie chart.
///
/// Categories are stored in the database as their text form, so the set
/// can only grow: removing or renaming a variant would orphan existing
/// rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries, eating out, snacks.
    Food,
    /// Bus and train fares, fuel, parking.
    Transport,
    /// Movies, games, going out.
    Entertainment,
    /// Rent, power, phone and similar recurring charges.
    Bills,
    /// Anything that does not fit the other categories.
    Other,
}

impl Category {
    /// Every category, in the order a picker should present them.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Bills,
        Category::Other,
    ];

    /// The category's canonical text form, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Food" => Ok(Category::Food),
            "Transport" => Ok(Category::Transport),
            "Entertainment" => Ok(Category::Entertainment),
            "Bills" => Ok(Category::Bills),
            "Other" => Ok(Category::Other),
            _ => Err(Error::InvalidCategory(s.to_string())),
        }
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}
