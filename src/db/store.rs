//! SQLite implementation of the engine's `UserStore`.

use crate::core::store::UserStore;
use crate::db::queries::{load_user, save_user};
use crate::errors::AppResult;
use crate::models::user::User;
use rusqlite::{Connection, TransactionBehavior};

/// Every mutation runs in a `BEGIN IMMEDIATE` transaction: the write lock is
/// taken before the record is read, so two processes updating the same member
/// serialize instead of overwriting each other.
pub struct SqliteUserStore<'a> {
    conn: &'a mut Connection,
    default_rate: f64,
}

impl<'a> SqliteUserStore<'a> {
    pub fn new(conn: &'a mut Connection, default_rate: f64) -> Self {
        Self { conn, default_rate }
    }

    fn load_normalized(conn: &Connection, user_id: i64, default_rate: f64) -> AppResult<User> {
        let mut user = load_user(conn, user_id)?;
        user.normalize(default_rate);
        Ok(user)
    }
}

impl UserStore for SqliteUserStore<'_> {
    fn load(&mut self, user_id: i64) -> AppResult<User> {
        // Deferred transaction: a consistent snapshot across the three tables.
        let tx = self.conn.transaction()?;
        let user = Self::load_normalized(&tx, user_id, self.default_rate)?;
        tx.commit()?;
        Ok(user)
    }

    fn save(&mut self, user: &User) -> AppResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        save_user(&tx, user)?;
        tx.commit()?;
        Ok(())
    }

    fn update<T, F>(&mut self, user_id: i64, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut User) -> AppResult<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut user = Self::load_normalized(&tx, user_id, self.default_rate)?;

        // On error the transaction is dropped and rolled back.
        let out = mutate(&mut user)?;

        save_user(&tx, &user)?;
        tx.commit()?;
        Ok(out)
    }
}
