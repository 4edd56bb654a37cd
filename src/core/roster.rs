//! Member registration and profile edits.

use crate::core::rates::RateTable;
use crate::db::queries::{
    NewUser, find_user_id_by_username, insert_user, load_user, other_display_names,
    update_display_name,
};
use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use rusqlite::Connection;

pub struct RosterLogic;

/// Outcome of a rename request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rename {
    Renamed { from: String, to: String },
    Unchanged,
}

impl RosterLogic {
    pub fn register(
        conn: &Connection,
        rates: &RateTable,
        allowed_ranks: &[String],
        username: &str,
        display_name: &str,
        position: &str,
        rank: Option<&str>,
    ) -> AppResult<User> {
        let username = username.trim();
        let display_name = display_name.trim();
        let position = position.trim();
        let rank = rank.map(str::trim).unwrap_or("");

        if username.is_empty() || display_name.is_empty() || position.is_empty() {
            return Err(AppError::InvalidInput(
                "username, name and position are required".into(),
            ));
        }

        if !rank.is_empty() && !allowed_ranks.iter().any(|r| r == rank) {
            return Err(AppError::InvalidRank(format!(
                "'{}' (allowed: {})",
                rank,
                allowed_ranks.join(", ")
            )));
        }

        if find_user_id_by_username(conn, username)?.is_some() {
            return Err(AppError::UserExists(username.to_string()));
        }

        let id = insert_user(
            conn,
            &NewUser {
                username,
                display_name,
                position,
                rank,
                salary_rate: rates.rate_for(position),
            },
        )?;

        load_user(conn, id)
    }

    /// Change a member's display name. Names are unique, case-insensitively.
    pub fn rename(conn: &Connection, user_id: i64, new_name: &str) -> AppResult<Rename> {
        let user = load_user(conn, user_id)?;
        let new_name = new_name.trim();

        if new_name.is_empty() || new_name == user.display_name {
            return Ok(Rename::Unchanged);
        }

        let wanted = new_name.to_lowercase();
        if other_display_names(conn, user_id)?
            .iter()
            .any(|n| n.to_lowercase() == wanted)
        {
            return Err(AppError::NameTaken(new_name.to_string()));
        }

        update_display_name(conn, user_id, new_name)?;

        Ok(Rename::Renamed {
            from: user.display_name,
            to: new_name.to_string(),
        })
    }
}
