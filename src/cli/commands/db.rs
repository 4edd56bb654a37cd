use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{pending_migrations, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};

/// Open the database lazily, once, for whichever flags were given.
fn get_pool<'a>(pool: &'a mut Option<DbPool>, db_path: &str) -> AppResult<&'a mut DbPool> {
    let opened = match pool.take() {
        Some(p) => p,
        None => DbPool::new(db_path)?,
    };
    Ok(pool.insert(opened))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let mut pool: Option<DbPool> = None;

        //
        // 1) MIGRATE
        //
        if *migrate {
            let pool = get_pool(&mut pool, &cfg.database)?;
            let pending = pending_migrations(&pool.conn)?;
            if pending.is_empty() {
                println!("{}✔ Schema already up to date.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}▶ Running {} migration(s)…{}",
                    CYAN,
                    pending.len(),
                    RESET
                );
                run_pending_migrations(&pool.conn)?;
                println!("{}✔ Migration completed.{}\n", GREEN, RESET);
            }
        }

        //
        // 2) INFO
        //
        if *info {
            let pool = get_pool(&mut pool, &cfg.database)?;
            let pending = pending_migrations(&pool.conn)?;
            stats::print_db_info(pool, cfg)?;
            if !pending.is_empty() {
                println!(
                    "{}• Pending migrations:{} {}{}{}\n",
                    CYAN,
                    RESET,
                    YELLOW,
                    pending.join(", "),
                    RESET
                );
            }
        }

        //
        // 3) CHECK
        //
        if *check {
            let pool = get_pool(&mut pool, &cfg.database)?;

            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            let pool = get_pool(&mut pool, &cfg.database)?;
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);

            pool.conn.execute_batch("VACUUM;")?;

            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
