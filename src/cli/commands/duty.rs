use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::engine::{AttendanceEngine, ClosedShift};
use crate::core::query::QueryView;
use crate::core::store::UserStore;
use crate::core::tracker::DutyPolicy;
use crate::db::log;
use crate::db::store::SqliteUserStore;
use crate::errors::{AppError, AppResult, AttendanceError};
use crate::models::month_summary::MonthKey;
use crate::models::session_status::SessionStatus;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{colorize_flag, colorize_status};
use crate::utils::date::{format_date, parse_date};
use crate::utils::table::{Column, Table};
use crate::utils::{format_hours, format_money};

/// Handle `on | off | status | month | history`
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let mut pool = open_db(cfg)?;
    let policy = DutyPolicy::from_config(cfg);

    match cmd {
        Commands::On { user } => {
            let started = {
                let mut store = SqliteUserStore::new(&mut pool.conn, cfg.default_rate);
                let mut engine = AttendanceEngine::new(&mut store, clock, policy);
                match engine.check_in(*user) {
                    Ok(s) => s,
                    Err(e) => {
                        if let Some(AttendanceError::CapReached) = e.attendance() {
                            warning(format!(
                                "Daily cap of {} h reached for {}. Come back tomorrow.",
                                format_hours(policy.daily_cap_hours),
                                format_date(engine.today(), &cfg.date_format)
                            ));
                        }
                        return Err(e);
                    }
                }
            };

            success(format!(
                "Member #{} on duty since {} ({})",
                user,
                started.on_time.format("%H:%M:%S"),
                format_date(started.date, &cfg.date_format)
            ));

            log::audit(
                &pool.conn,
                "check_in",
                &user.to_string(),
                &format!("on duty at {}", started.on_time.format("%Y-%m-%d %H:%M:%S")),
            );
        }

        Commands::Off { user } => {
            let shift = {
                let mut store = SqliteUserStore::new(&mut pool.conn, cfg.default_rate);
                AttendanceEngine::new(&mut store, clock, policy).check_off(*user)?
            };

            print_closed_shift(&shift, cfg);

            log::audit(
                &pool.conn,
                "check_off",
                &user.to_string(),
                &format!(
                    "{} | {} h | {}",
                    shift.session.status.to_db_str(),
                    format_hours(shift.session.hours),
                    format_money(shift.session.salary, &cfg.thousands_separator)
                ),
            );
        }

        Commands::Status { user, date } => {
            // One load: every figure below comes from the same snapshot.
            let member = SqliteUserStore::new(&mut pool.conn, cfg.default_rate).load(*user)?;
            let now = clock.now();

            let day = match date {
                Some(raw) => parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?,
                None => now.date(),
            };
            let month = MonthKey::of(now);
            let summary = QueryView::daily_summary(&member, day, &policy);
            let totals = QueryView::monthly_summary(&member, month);
            let sep = &cfg.thousands_separator;

            header(format!(
                "Duty status: {} ({})",
                member.display_name,
                format_date(day, &cfg.date_format)
            ));
            println!(
                "Position        : {} {}",
                member.position,
                if member.rank.is_empty() {
                    String::new()
                } else {
                    format!("[{}]", member.rank)
                }
            );
            println!(
                "Rate            : {}/h",
                format_money(member.salary_rate, sep)
            );
            println!(
                "Completed today : {} h / {} h",
                format_hours(summary.completed_hours),
                format_hours(policy.daily_cap_hours)
            );
            println!("Remaining       : {} h", format_hours(summary.remaining_hours));

            match member.open_session() {
                Some(open) => println!(
                    "On duty         : {} (since {} {})",
                    colorize_flag(true),
                    format_date(open.date, &cfg.date_format),
                    open.on_time_str()
                ),
                None => println!("On duty         : {}", colorize_flag(false)),
            }
            println!("Can check in    : {}", colorize_flag(summary.can_check_in));

            println!(
                "\nMonth {}    : {} h | {}",
                month,
                format_hours(totals.hours),
                format_money(totals.salary, sep)
            );
            println!("Career total    : {}", format_money(member.career_total, sep));
        }

        Commands::Month { user, month } => {
            let mut store = SqliteUserStore::new(&mut pool.conn, cfg.default_rate);
            let mut engine = AttendanceEngine::new(&mut store, clock, policy);

            let key = match month {
                Some(raw) => raw.parse::<MonthKey>()?,
                None => engine.current_month(),
            };
            let totals = engine.monthly_summary(*user, key)?;

            header(format!("Member #{} – {}", user, key));
            println!("Hours  : {}", format_hours(totals.hours));
            println!(
                "Salary : {}",
                format_money(totals.salary, &cfg.thousands_separator)
            );
        }

        Commands::History { user } => {
            let member = SqliteUserStore::new(&mut pool.conn, cfg.default_rate).load(*user)?;
            let sep = &cfg.thousands_separator;

            header(format!("Attendance: {}", member.display_name));

            let groups = QueryView::grouped_attendance(&member);
            if groups.is_empty() {
                info("No duty sessions recorded.");
            }

            for group in &groups {
                println!("\n📅 {}", format_date(group.date, &cfg.date_format));

                let mut table = Table::new(vec![
                    Column::left("ON"),
                    Column::left("OFF"),
                    Column::right("HOURS"),
                    Column::right("SALARY"),
                    Column::left("STATUS"),
                ]);
                for s in &group.sessions {
                    table.add_row(vec![
                        s.on_time_str(),
                        s.off_time_str(),
                        format_hours(s.hours),
                        format_money(s.salary, sep),
                        colorize_status(s.status),
                    ]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }

            if !member.monthly_history.is_empty() {
                header("Monthly history");
                let mut table = Table::new(vec![
                    Column::left("MONTH"),
                    Column::right("HOURS"),
                    Column::right("SALARY"),
                ]);
                for m in &member.monthly_history {
                    table.add_row(vec![
                        m.month.to_string(),
                        format_hours(m.hours),
                        format_money(m.salary, sep),
                    ]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }

            println!("\nCareer total: {}", format_money(member.career_total, sep));
        }

        _ => {}
    }

    Ok(())
}

fn print_closed_shift(shift: &ClosedShift, cfg: &Config) {
    let sep = &cfg.thousands_separator;
    let s = &shift.session;
    let minutes = (s.off_time - s.on_time).num_minutes();

    match s.status {
        SessionStatus::Forfeited => warning(format!(
            "{} ({} min on duty, nothing credited)",
            s.status.label(),
            minutes
        )),
        SessionStatus::CappedOut => {
            success(format!(
                "{}: {} h credited → {}",
                s.status.label(),
                format_hours(s.hours),
                format_money(s.salary, sep)
            ));
            info(format!(
                "{} min on duty, trimmed to the daily cap of {} h",
                minutes,
                format_hours(cfg.daily_cap_hours)
            ));
        }
        SessionStatus::Completed | SessionStatus::OnDuty => success(format!(
            "{}: {} h credited → {}",
            s.status.label(),
            format_hours(s.hours),
            format_money(s.salary, sep)
        )),
    }

    println!(
        "Month {}: {} h | {}",
        shift.month,
        format_hours(shift.month_totals.hours),
        format_money(shift.month_totals.salary, sep)
    );
    println!("Career total: {}", format_money(shift.career_total, sep));
}
