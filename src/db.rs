//! Database initialization and the one-time schema migration.

use rusqlite::Connection;

use crate::{Error, account::create_account_table, expense::create_expense_table};

/// Create the application tables if they are missing and bring an older
/// database file up to the current schema.
///
/// This must be called once against the long-lived connection before any
/// other store operation. The call is idempotent, so running it against
/// an already current database changes nothing. If it returns an error
/// the database must not be used: every other operation assumes the
/// schema is in place.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created or the
/// migration could not be applied.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_account_table(connection)?;
    create_expense_table(connection)?;
    ensure_expense_name_column(connection)?;

    Ok(())
}

/// Add the `name` column to the `expenses` table if it is missing.
///
/// Data files written before the `name` column existed lack it. Rows
/// that predate the migration read back with an absent name.
fn ensure_expense_name_column(connection: &Connection) -> Result<(), Error> {
    let columns: Vec<String> = connection
        .prepare("PRAGMA table_info(expenses)")?
        .query_map([], |row| row.get(1))?
        .collect::<Result<_, _>>()?;

    if !columns.iter().any(|column| column == "name") {
        tracing::info!("adding the missing name column to the expenses table");
        connection.execute("ALTER TABLE expenses ADD COLUMN name TEXT", ())?;
    }

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Category,
        expense::{create_expense, get_expenses},
    };

    use super::initialize;

    #[test]
    fn initialize_creates_both_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        let table_count: usize = connection
            .query_row(
                "SELECT COUNT(name) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('users', 'expenses')",
                [],
                |row| row.get::<_, i64>(0).map(|count| count as usize),
            )
            .unwrap();
        assert_eq!(table_count, 2);
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("First initialize failed");
        initialize(&connection).expect("Second initialize failed");
    }

    #[test]
    fn initialize_adds_name_column_to_old_schema() {
        let connection = Connection::open_in_memory().unwrap();

        // The expenses table as written by versions before the name column.
        connection
            .execute(
                "CREATE TABLE expenses (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    username TEXT,
                    category TEXT,
                    amount REAL,
                    date TEXT
                    )",
                (),
            )
            .unwrap();
        connection
            .execute(
                "INSERT INTO expenses (username, category, amount, date)
                 VALUES ('alice', 'Food', 4.5, '2024-01-01')",
                (),
            )
            .unwrap();

        initialize(&connection).expect("Could not migrate old database");

        let expenses = get_expenses("alice", &connection).expect("Could not read migrated rows");
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].name, None);
        assert_eq!(expenses[0].amount, 4.5);
    }

    #[test]
    fn full_session_flow_works_end_to_end() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        crate::create_account("alice", "hunter2", &connection).unwrap();
        let account = crate::authenticate("alice", "hunter2", &connection)
            .expect("Could not log in after sign-up");

        create_expense(
            &account.username,
            "Coffee",
            Category::Food,
            4.5,
            date!(2024 - 01 - 01),
            &connection,
        )
        .unwrap();
        let bus = create_expense(
            &account.username,
            "Bus",
            Category::Transport,
            2.0,
            date!(2024 - 01 - 01),
            &connection,
        )
        .unwrap();
        create_expense(
            &account.username,
            "Movie",
            Category::Entertainment,
            12.0,
            date!(2024 - 01 - 02),
            &connection,
        )
        .unwrap();

        let expenses = get_expenses(&account.username, &connection).unwrap();
        assert_eq!(crate::total_spent(&expenses), 18.5);

        crate::delete_expense(bus.id, &connection).unwrap();

        let expenses = get_expenses(&account.username, &connection).unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(crate::total_spent(&expenses), 16.5);

        let csv = crate::export_csv(&account.username, &connection).unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert!(csv.starts_with("Name,Category,Amount,Date\n"));
        assert!(!csv.contains("Bus"));
    }

    #[test]
    fn name_round_trips_after_migration() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute(
                "CREATE TABLE expenses (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    username TEXT,
                    category TEXT,
                    amount REAL,
                    date TEXT
                    )",
                (),
            )
            .unwrap();

        initialize(&connection).expect("Could not migrate old database");

        let expense = create_expense(
            "alice",
            "Coffee",
            Category::Food,
            4.5,
            date!(2024 - 01 - 01),
            &connection,
        )
        .expect("Could not create expense after migration");
        let expenses = get_expenses("alice", &connection).unwrap();

        assert_eq!(expenses, vec![expense]);
        assert_eq!(
            expenses[0].name.as_ref().map(|name| name.as_ref()),
            Some("Coffee")
        );
    }
}
