/// ANSI color helper utilities for terminal output.
use crate::models::session_status::SessionStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_status(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::OnDuty => BLUE,
        SessionStatus::Forfeited => GREY,
        SessionStatus::Completed => GREEN,
        SessionStatus::CappedOut => YELLOW,
    }
}

pub fn colorize_status(status: SessionStatus) -> String {
    format!("{}{}{}", color_for_status(status), status.label(), RESET)
}

/// yes → green, no → red
pub fn colorize_flag(flag: bool) -> String {
    if flag {
        format!("{GREEN}yes{RESET}")
    } else {
        format!("{RED}no{RESET}")
    }
}
