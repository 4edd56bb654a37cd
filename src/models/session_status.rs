use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    OnDuty,
    Forfeited,
    Completed,
    CappedOut,
}

impl SessionStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SessionStatus::OnDuty => "on_duty",
            SessionStatus::Forfeited => "forfeited",
            SessionStatus::Completed => "completed",
            SessionStatus::CappedOut => "capped_out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "on_duty" => Some(SessionStatus::OnDuty),
            "forfeited" => Some(SessionStatus::Forfeited),
            "completed" => Some(SessionStatus::Completed),
            "capped_out" => Some(SessionStatus::CappedOut),
            _ => None,
        }
    }

    /// Human readable label used by list/history outputs.
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::OnDuty => "On duty",
            SessionStatus::Forfeited => "Under 1 hour - unpaid",
            SessionStatus::Completed => "Shift completed",
            SessionStatus::CappedOut => "Daily cap reached",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, SessionStatus::OnDuty)
    }
}
