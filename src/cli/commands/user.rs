use crate::cli::commands::open_db;
use crate::cli::parser::UserAction;
use crate::config::Config;
use crate::core::rates::RateTable;
use crate::core::roster::{Rename, RosterLogic};
use crate::db::log;
use crate::db::queries::{list_users, on_duty_user_ids};
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::colorize_flag;
use crate::utils::format_money;
use crate::utils::table::{Column, Table};

/// Handle `user add | list | rename`
pub fn handle(action: &UserAction, cfg: &Config) -> AppResult<()> {
    let pool = open_db(cfg)?;
    let conn = &pool.conn;

    match action {
        UserAction::Add {
            username,
            name,
            position,
            rank,
        } => {
            let rates = RateTable::from_config(cfg);
            let user = RosterLogic::register(
                conn,
                &rates,
                &cfg.ranks,
                username,
                name,
                position,
                rank.as_deref(),
            )?;

            success(format!(
                "Member #{} '{}' registered as {} ({}/h)",
                user.id,
                user.display_name,
                user.position,
                format_money(user.salary_rate, &cfg.thousands_separator)
            ));

            log::audit(
                conn,
                "user_add",
                &user.id.to_string(),
                &format!("{} ({}) → {}", user.username, user.display_name, user.position),
            );
        }

        UserAction::List => {
            let users = list_users(conn)?;
            if users.is_empty() {
                info("No members registered yet.");
                return Ok(());
            }

            header("Members");
            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("USERNAME"),
                Column::left("NAME"),
                Column::left("POSITION"),
                Column::left("RANK"),
                Column::right("RATE/H"),
                Column::right("CAREER"),
                Column::left("ON DUTY"),
            ]);

            let on_duty = on_duty_user_ids(conn)?;
            let sep = &cfg.thousands_separator;
            for u in &users {
                table.add_row(vec![
                    u.id.to_string(),
                    u.username.clone(),
                    u.display_name.clone(),
                    u.position.clone(),
                    u.rank.clone(),
                    format_money(u.salary_rate, sep),
                    format_money(u.career_total, sep),
                    colorize_flag(on_duty.contains(&u.id)),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
            println!("\n{} member(s)", users.len());
        }

        UserAction::Rename { user, name } => match RosterLogic::rename(conn, *user, name)? {
            Rename::Renamed { from, to } => {
                success(format!("Member #{} renamed: {} → {}", user, from, to));
                log::audit(
                    conn,
                    "user_rename",
                    &user.to_string(),
                    &format!("{} → {}", from, to),
                );
            }
            Rename::Unchanged => info("Display name unchanged."),
        },
    }

    Ok(())
}
