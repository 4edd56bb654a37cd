use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const MAX_OP_WIDTH: usize = 60;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI pattern"));

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// ANSI colour per audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "check_in" => Colour::Green,
        "check_off" => Colour::Cyan,
        "user_add" => Colour::Blue,
        "user_rename" => Colour::Yellow,
        "export" => Colour::White,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

struct LogEntry {
    id: i64,
    date: String,
    operation: String,
    target: String,
    message: String,
}

impl LogEntry {
    fn op_target(&self) -> String {
        if self.target.is_empty() {
            self.operation.clone()
        } else {
            format!("{} ({})", self.operation, self.target)
        }
    }
}

/// Cut to `max` visible characters, keeping only the operation word coloured.
fn render_op_target(entry: &LogEntry, max: usize) -> String {
    let color = color_for_operation(&entry.operation);
    let visible = entry.op_target();

    let truncated = if visible.chars().count() > max {
        let mut s: String = visible.chars().take(max.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    match truncated.split_once(' ') {
        Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
        None => color.paint(truncated.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| e.op_target().chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

        println!("📜 Internal log:\n");

        for entry in &entries {
            let rendered = render_op_target(entry, MAX_OP_WIDTH);

            // padding measured without ANSI codes
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&rendered).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                entry.date,
                rendered,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
