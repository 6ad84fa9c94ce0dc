//! Database schema initialization.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, expense::create_expense_table};

/// Create the application's tables if they do not already exist.
///
/// Safe to call on every startup. The schema is created inside an exclusive
/// transaction so that two racing initializations cannot interleave.
///
/// # Errors
/// Returns an error if the schema cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::expense::{Category, Expense, create_expense};

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("first initialize failed");
        initialize(&conn).expect("second initialize failed");
    }

    #[test]
    fn initialized_database_accepts_writes() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let expense =
            create_expense(Expense::build(9.99, date!(2024 - 05 - 01), Category::Shopping), &conn)
                .expect("could not insert after initialize");

        assert_eq!(expense.id, 1);
    }
}
