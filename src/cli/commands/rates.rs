use crate::config::Config;
use crate::core::rates::RateTable;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::format_money;
use crate::utils::table::{Column, Table};

/// Handle the `rates` command: the wage table and the rank list.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let rates = RateTable::from_config(cfg);
    let sep = &cfg.thousands_separator;

    header("Hourly rates by position");

    let mut table = Table::new(vec![Column::left("POSITION"), Column::right("RATE/H")]);
    for (position, rate) in rates.entries() {
        table.add_row(vec![position.to_string(), format_money(rate, sep)]);
    }
    print!("{}", table.render(&cfg.separator_char));

    println!(
        "\nDefault rate (unknown or empty position): {}",
        format_money(rates.default_rate(), sep)
    );
    println!(
        "Daily cap: {:.2} h | Minimum paid session: {} min",
        cfg.daily_cap_hours, cfg.min_session_minutes
    );

    header("Ranks");
    for rank in &cfg.ranks {
        println!("  • {}", rank);
    }

    Ok(())
}
