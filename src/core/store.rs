//! Persistence seam for the engine.

use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use std::collections::BTreeMap;

/// Whole-record access to one user at a time.
///
/// `update` is the only mutating path the engine uses: implementations must
/// hold exclusive access to the record from load to save, and must not
/// persist anything when the mutation returns an error.
pub trait UserStore {
    fn load(&mut self, user_id: i64) -> AppResult<User>;

    fn save(&mut self, user: &User) -> AppResult<()>;

    fn update<T, F>(&mut self, user_id: i64, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut User) -> AppResult<T>;
}

/// In-memory store keyed by user id.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    users: BTreeMap<i64, User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn get(&self, user_id: i64) -> Option<&User> {
        self.users.get(&user_id)
    }
}

impl UserStore for MemoryUserStore {
    fn load(&mut self, user_id: i64) -> AppResult<User> {
        self.users
            .get(&user_id)
            .cloned()
            .ok_or(AppError::UserNotFound(user_id))
    }

    fn save(&mut self, user: &User) -> AppResult<()> {
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    fn update<T, F>(&mut self, user_id: i64, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut User) -> AppResult<T>,
    {
        // Work on a copy so a failed mutation leaves the stored record untouched.
        let mut working = self.load(user_id)?;
        let out = mutate(&mut working)?;
        self.save(&working)?;
        Ok(out)
    }
}
