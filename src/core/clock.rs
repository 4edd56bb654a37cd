//! Time source for the engine. All timestamps are naive wall-clock values in
//! the organization's local timezone.

use chrono::{FixedOffset, Local, NaiveDateTime, Utc};

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Real clock: system local time, or a fixed UTC offset when configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    pub fn new(offset: Option<FixedOffset>) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// Clock pinned to one instant (tests and the hidden `--now` flag).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
