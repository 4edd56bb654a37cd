use chrono::{NaiveDate, NaiveDateTime};
use rdutylog::core::clock::Clock;
use rdutylog::core::engine::AttendanceEngine;
use rdutylog::core::salary::round2;
use rdutylog::core::store::{MemoryUserStore, UserStore};
use rdutylog::core::tracker::DutyPolicy;
use rdutylog::errors::{AppError, AttendanceError};
use rdutylog::models::month_summary::MonthKey;
use rdutylog::models::session_status::SessionStatus;
use rdutylog::models::user::User;
use std::cell::Cell;

const RATE: f64 = 10000.0;

/// Clock the test can move forward between calls.
struct StepClock(Cell<NaiveDateTime>);

impl StepClock {
    fn at(ts: &str) -> Self {
        Self(Cell::new(ts_of(ts)))
    }

    fn set(&self, ts: &str) {
        self.0.set(ts_of(ts));
    }
}

impl Clock for StepClock {
    fn now(&self) -> NaiveDateTime {
        self.0.get()
    }
}

fn ts_of(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .expect("test timestamp")
}

fn member(id: i64, rate: f64) -> User {
    User {
        id,
        username: format!("member{id}"),
        display_name: format!("Member {id}"),
        position: "Officer".into(),
        rank: String::new(),
        salary_rate: rate,
        career_total: 0.0,
        attendance: Vec::new(),
        monthly_history: Vec::new(),
        created_at: "2025-11-01 00:00:00".into(),
    }
}

fn store_with_member() -> MemoryUserStore {
    let mut store = MemoryUserStore::new();
    store.insert(member(1, RATE));
    store
}

fn attendance_error(e: AppError) -> AttendanceError {
    e.attendance().cloned().expect("attendance error")
}

#[test]
fn short_session_is_forfeited() {
    let mut store = store_with_member();
    let clock = StepClock::at("2025-11-19 09:00");
    let mut engine = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default());

    engine.check_in(1).expect("check in");
    clock.set("2025-11-19 09:30");
    let shift = engine.check_off(1).expect("check off");

    assert_eq!(shift.session.status, SessionStatus::Forfeited);
    assert_eq!(shift.session.hours, 0.0);
    assert_eq!(shift.session.salary, 0.0);
    assert_eq!(shift.career_total, 0.0);
}

#[test]
fn exactly_one_hour_is_paid() {
    let mut store = store_with_member();
    let clock = StepClock::at("2025-11-19 09:00");
    let mut engine = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default());

    engine.check_in(1).expect("check in");
    clock.set("2025-11-19 10:00:00");
    let shift = engine.check_off(1).expect("check off");

    assert_eq!(shift.session.status, SessionStatus::Completed);
    assert_eq!(shift.session.hours, 1.0);
    assert_eq!(shift.session.salary, 10000.0);
}

#[test]
fn one_second_short_of_an_hour_is_forfeited() {
    let mut store = store_with_member();
    let clock = StepClock::at("2025-11-19 09:00");
    let mut engine = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default());

    engine.check_in(1).expect("check in");
    clock.set("2025-11-19 09:59:59");
    let shift = engine.check_off(1).expect("check off");

    assert_eq!(shift.session.status, SessionStatus::Forfeited);
    assert_eq!(shift.session.hours, 0.0);
    assert_eq!(shift.session.salary, 0.0);
}

#[test]
fn same_day_sessions_fill_the_cap_then_refuse() {
    let mut store = store_with_member();
    let clock = StepClock::at("2025-11-19 09:00");

    {
        let mut engine = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default());

        engine.check_in(1).expect("first check in");
        clock.set("2025-11-19 11:00");
        let first = engine.check_off(1).expect("first check off");
        assert_eq!(first.session.status, SessionStatus::Completed);
        assert_eq!(first.session.hours, 2.0);
        assert_eq!(first.session.salary, 20000.0);

        clock.set("2025-11-19 12:00");
        engine.check_in(1).expect("second check in");
        clock.set("2025-11-19 15:00");
        let second = engine.check_off(1).expect("second check off");
        assert_eq!(second.session.status, SessionStatus::CappedOut);
        assert_eq!(second.session.hours, 2.0);
        assert_eq!(second.session.salary, 20000.0);
        assert_eq!(second.career_total, 40000.0);

        clock.set("2025-11-19 16:00");
        let err = engine.check_in(1).expect_err("cap reached");
        assert_eq!(attendance_error(err), AttendanceError::CapReached);
    }

    let user = store.get(1).expect("member");
    assert_eq!(user.attendance.len(), 2);
    assert!(!user.is_on_duty());
}

#[test]
fn check_off_without_open_session_changes_nothing() {
    let mut store = store_with_member();
    let before = store.get(1).cloned();
    let clock = StepClock::at("2025-11-19 10:00");

    let err = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default())
        .check_off(1)
        .expect_err("nothing to close");

    assert_eq!(attendance_error(err), AttendanceError::NoOpenSession);
    assert_eq!(store.get(1).cloned(), before);
}

#[test]
fn open_session_blocks_a_second_check_in() {
    let mut store = store_with_member();
    let clock = StepClock::at("2025-11-19 09:00");
    let mut engine = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default());

    engine.check_in(1).expect("check in");
    clock.set("2025-11-19 09:10");
    let err = engine.check_in(1).expect_err("already open");
    assert_eq!(attendance_error(err), AttendanceError::SessionAlreadyOpen);
}

#[test]
fn clock_running_backwards_is_rejected_without_writes() {
    let mut store = store_with_member();
    let clock = StepClock::at("2025-11-19 09:00");

    AttendanceEngine::new(&mut store, &clock, DutyPolicy::default())
        .check_in(1)
        .expect("check in");
    let before = store.get(1).cloned();

    clock.set("2025-11-19 08:00");
    let err = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default())
        .check_off(1)
        .expect_err("off before on");

    assert!(matches!(
        attendance_error(err),
        AttendanceError::InvalidTimestamp(_)
    ));
    assert_eq!(store.get(1).cloned(), before);
}

#[test]
fn unknown_member_is_not_found() {
    let mut store = store_with_member();
    let clock = StepClock::at("2025-11-19 09:00");

    let err = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default())
        .check_in(7)
        .expect_err("no such member");
    assert!(matches!(err, AppError::UserNotFound(7)));
}

#[test]
fn month_is_keyed_by_close_time_and_new_months_go_first() {
    let mut store = store_with_member();
    let clock = StepClock::at("2025-11-30 22:00");

    {
        let mut engine = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default());
        engine.check_in(1).expect("check in");
        clock.set("2025-12-01 01:00");
        let shift = engine.check_off(1).expect("check off");

        // filed under the start day, paid in the month it ended
        assert_eq!(shift.session.date, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
        assert_eq!(shift.month, MonthKey::new(2025, 12).unwrap());
        assert_eq!(shift.month_totals.hours, 3.0);

        clock.set("2025-12-05 09:00");
        engine.check_in(1).expect("check in");
        clock.set("2025-12-05 10:00");
        engine.check_off(1).expect("check off");
    }

    let user = store.get(1).expect("member");
    assert_eq!(user.monthly_history.len(), 1);
    assert_eq!(user.monthly_history[0].hours, 4.0);
}

#[test]
fn midnight_shift_is_capped_against_the_day_it_ends() {
    let mut store = store_with_member();
    let clock = StepClock::at("2025-11-20 08:00");

    {
        let mut engine = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default());
        engine.check_in(1).expect("check in");
        clock.set("2025-11-20 11:00");
        engine.check_off(1).expect("check off");

        // 3h already closed on the 20th, but the late shift ends on the 21st,
        // where nothing is closed yet: it is not trimmed to the 1h left.
        clock.set("2025-11-20 22:00");
        engine.check_in(1).expect("late check in");
        clock.set("2025-11-21 01:00");
        let late = engine.check_off(1).expect("late check off");

        assert_eq!(late.session.date, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
        assert_eq!(late.session.hours, 3.0);
        assert_eq!(late.session.status, SessionStatus::Completed);

        // both sessions are dated the 20th, so the cap now blocks that day
        clock.set("2025-11-20 23:30");
        let err = engine.check_in(1).expect_err("cap reached on the 20th");
        assert_eq!(attendance_error(err), AttendanceError::CapReached);
    }
}

#[test]
fn daily_and_monthly_queries_are_pure() {
    let mut store = store_with_member();
    let clock = StepClock::at("2025-11-19 09:00");
    let day = NaiveDate::from_ymd_opt(2025, 11, 19).unwrap();
    let month = MonthKey::new(2025, 11).unwrap();

    let mut engine = AttendanceEngine::new(&mut store, &clock, DutyPolicy::default());
    engine.check_in(1).expect("check in");
    clock.set("2025-11-19 10:30");
    engine.check_off(1).expect("check off");
    clock.set("2025-11-19 11:00");
    engine.check_in(1).expect("check in");

    let first = engine.daily_summary(1, day).expect("summary");
    let again = engine.daily_summary(1, day).expect("summary");
    assert_eq!(first, again);
    assert_eq!(first.completed_hours, 1.5);
    assert_eq!(first.remaining_hours, 2.5);
    assert!(first.is_on_duty);
    assert!(!first.can_check_in);

    let totals = engine.monthly_summary(1, month).expect("month");
    assert_eq!(totals.hours, 1.5);
    assert_eq!(totals.salary, 15000.0);

    let empty = engine
        .monthly_summary(1, MonthKey::new(2024, 1).unwrap())
        .expect("month");
    assert_eq!(empty.hours, 0.0);
    assert_eq!(empty.salary, 0.0);
}

#[test]
fn totals_stay_consistent_across_many_shifts() {
    let mut store = MemoryUserStore::new();
    store.insert(member(1, 10714.0));
    let clock = StepClock::at("2025-11-01 08:00");
    let policy = DutyPolicy::default();

    // uneven lengths, some forfeited, some over the cap
    let shifts = [
        ("2025-11-01 08:00", "2025-11-01 08:45"),
        ("2025-11-01 09:00", "2025-11-01 10:07"),
        ("2025-11-01 11:00", "2025-11-01 14:59"),
        ("2025-11-02 07:13", "2025-11-02 09:41"),
        ("2025-11-02 10:00", "2025-11-02 11:01"),
        ("2025-11-03 20:00", "2025-11-04 01:17"),
        ("2025-11-04 06:00", "2025-11-04 07:30"),
        ("2025-11-30 23:00", "2025-12-01 02:22"),
    ];

    {
        let mut engine = AttendanceEngine::new(&mut store, &clock, policy);
        for (on, off) in shifts {
            clock.set(on);
            if engine.check_in(1).is_err() {
                continue;
            }
            clock.set(off);
            let shift = engine.check_off(1).expect("check off");

            let drift = (shift.session.salary - round2(shift.session.hours * 10714.0)).abs();
            assert!(drift <= 0.01, "salary drift {drift} on {on}");
        }
    }

    let user = store.get(1).expect("member");

    // per-day credited hours never exceed the cap
    for group in rdutylog::core::query::QueryView::grouped_attendance(user) {
        let day_total: f64 = group.sessions.iter().map(|s| s.hours).sum();
        assert!(day_total <= policy.daily_cap_hours + 1e-6, "{} over cap", group.date);
    }

    let session_sum = round2(user.attendance.iter().map(|s| s.salary).sum());
    let month_sum = round2(user.monthly_history.iter().map(|m| m.salary).sum());
    assert!((user.career_total - session_sum).abs() <= 0.01);
    assert!((user.career_total - month_sum).abs() <= 0.01);

    for s in &user.attendance {
        match s.status {
            SessionStatus::Forfeited => assert_eq!((s.hours, s.salary), (0.0, 0.0)),
            SessionStatus::OnDuty => panic!("no session should be left open"),
            _ => assert!(s.hours > 0.0),
        }
    }
}

#[test]
fn normalization_fills_rate_and_merges_months() {
    let mut user = member(1, 0.0);
    user.career_total = -5.0;
    let key = MonthKey::new(2025, 11).unwrap();
    user.monthly_history = vec![
        rdutylog::models::month_summary::MonthSummary {
            month: key,
            hours: 1.5,
            salary: 15000.0,
        },
        rdutylog::models::month_summary::MonthSummary {
            month: key,
            hours: 2.0,
            salary: 20000.0,
        },
    ];

    user.normalize(10714.0);

    assert_eq!(user.salary_rate, 10714.0);
    assert_eq!(user.career_total, 0.0);
    assert_eq!(user.monthly_history.len(), 1);
    assert_eq!(user.monthly_history[0].hours, 3.5);
    assert_eq!(user.monthly_history[0].salary, 35000.0);
}

#[test]
fn memory_store_update_discards_failed_mutations() {
    let mut store = store_with_member();

    let res: Result<(), AppError> = store.update(1, |u| {
        u.career_total = 999.0;
        Err(AttendanceError::NoOpenSession.into())
    });

    assert!(res.is_err());
    assert_eq!(store.load(1).expect("member").career_total, 0.0);
}
