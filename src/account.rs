//! Account creation and credential lookup backed by the `users` table.
//!
//! Passwords are stored verbatim with no hashing. This mirrors the
//! behaviour of the data files this crate must stay compatible with and
//! is a known security defect; a hardened deployment should not reuse
//! this table as-is.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A username/password pair permitting access to a personal expense
/// ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The unique username identifying the account.
    pub username: String,
    /// The account's password, stored verbatim.
    pub password: String,
}

/// Create the `users` table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                password TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Create an account if and only if `username` is not already taken.
///
/// Signing up twice with the same username is a silent no-op, not an
/// error: the existing row is left untouched and the call reports
/// success either way.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn create_account(
    username: &str,
    password: &str,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "INSERT OR IGNORE INTO users (username, password) VALUES (?1, ?2)",
        (username, password),
    )?;

    Ok(())
}

/// Get the account matching `username` and `password` exactly.
///
/// An unknown username and a wrong password on a known username both
/// return [Error::InvalidCredentials], so a caller cannot tell the two
/// apart.
///
/// # Errors
///
/// This function will return an error if:
/// - the credentials do not match a stored account,
/// - there was an error trying to access the store.
pub fn authenticate(
    username: &str,
    password: &str,
    connection: &Connection,
) -> Result<Account, Error> {
    connection
        .prepare("SELECT username, password FROM users WHERE username = :username AND password = :password")?
        .query_row(
            &[(":username", &username), (":password", &password)],
            |row| {
                Ok(Account {
                    username: row.get(0)?,
                    password: row.get(1)?,
                })
            },
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::InvalidCredentials,
            error => error.into(),
        })
}

/// Get the number of accounts in the database.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn count_accounts(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(username) FROM users;", [], |row| {
            row.get::<_, i64>(0).map(|count| count as usize)
        })
        .map_err(|error| error.into())
}

#[cfg(test)]
mod account_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        account::{Account, authenticate, count_accounts, create_account},
    };

    use super::create_account_table;

    fn get_db_connection() -> Connection {
        let connection =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_account_table(&connection).expect("Could not create users table");

        connection
    }

    #[test]
    fn create_account_succeeds() {
        let connection = get_db_connection();

        let result = create_account("alice", "hunter2", &connection);

        assert_eq!(result, Ok(()));
        assert_eq!(count_accounts(&connection), Ok(1));
    }

    #[test]
    fn create_account_twice_leaves_one_row() {
        let connection = get_db_connection();

        create_account("alice", "hunter2", &connection).unwrap();
        create_account("alice", "hunter2", &connection)
            .expect("Duplicate sign-up should succeed silently");

        assert_eq!(count_accounts(&connection), Ok(1));
    }

    #[test]
    fn duplicate_create_account_does_not_overwrite_password() {
        let connection = get_db_connection();

        create_account("alice", "hunter2", &connection).unwrap();
        create_account("alice", "changed", &connection).unwrap();

        let account = authenticate("alice", "hunter2", &connection)
            .expect("The original password should still match");
        assert_eq!(
            account,
            Account {
                username: "alice".to_string(),
                password: "hunter2".to_string(),
            }
        );
    }

    #[test]
    fn authenticate_succeeds_with_exact_match() {
        let connection = get_db_connection();
        create_account("alice", "hunter2", &connection).unwrap();

        let account = authenticate("alice", "hunter2", &connection).unwrap();

        assert_eq!(account.username, "alice");
        assert_eq!(account.password, "hunter2");
    }

    #[test]
    fn authenticate_fails_with_wrong_password() {
        let connection = get_db_connection();
        create_account("alice", "hunter2", &connection).unwrap();

        let result = authenticate("alice", "hunter3", &connection);

        assert_eq!(result, Err(Error::InvalidCredentials));
    }

    #[test]
    fn authenticate_fails_with_unknown_username() {
        let connection = get_db_connection();
        create_account("alice", "hunter2", &connection).unwrap();

        let result = authenticate("bob", "hunter2", &connection);

        assert_eq!(result, Err(Error::InvalidCredentials));
    }

    #[test]
    fn wrong_password_and_unknown_username_are_indistinguishable() {
        let connection = get_db_connection();
        create_account("alice", "hunter2", &connection).unwrap();

        let wrong_password = authenticate("alice", "wrong", &connection);
        let unknown_username = authenticate("mallory", "wrong", &connection);

        assert_eq!(wrong_password, unknown_username);
    }
}
