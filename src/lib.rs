//! Expenseur is the storage and aggregation core of a personal expense
//! tracker.
//!
//! The crate owns two SQLite-backed stores and the derived views over
//! them:
//!
//! - accounts: idempotent sign-up and exact-match credential lookup,
//! - expenses: validated insertion, listing in insertion order, and
//!   delete-by-id as a silent no-op,
//! - summaries: pure functions (totals, category breakdown, daily time
//!   series, budget remainder) recomputed from the full expense list on
//!   every read,
//! - CSV export of an account's expense history.
//!
//! A presentation shell drives the crate through plain function calls,
//! passing in the database connection it owns. Call [initialize] once
//! against that connection before anything else; it creates the tables
//! and applies the one-time `name` column migration for older data
//! files.

#![warn(missing_docs)]

mod account;
mod category;
mod db;
mod error;
mod expense;
mod export;
mod summary;

pub use account::{Account, authenticate, count_accounts, create_account};
pub use category::Category;
pub use db::initialize;
pub use error::Error;
pub use expense::{
    Expense, ExpenseId, ExpenseName, count_expenses, create_expense, delete_expense, get_expenses,
};
pub use export::{export_csv, write_expenses_csv};
pub use summary::{
    CategoryTotal, DailyTotal, category_breakdown, daily_totals, filter_by_category,
    remaining_budget, total_spent,
};
