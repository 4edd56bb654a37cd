use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{duty_at, init_db_with_officer, rdl, setup_test_db};

#[test]
fn test_short_session_is_forfeited() {
    let db_path = setup_test_db("duty_forfeited");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-19 09:00").success();

    duty_at(&db_path, "off", "1", "2025-11-19 09:30")
        .success()
        .stdout(contains("Under 1 hour - unpaid"))
        .stdout(contains("30 min"))
        .stdout(contains("Career total: 0"));
}

#[test]
fn test_completed_session_is_paid() {
    let db_path = setup_test_db("duty_completed");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-19 09:00").success();

    duty_at(&db_path, "off", "1", "2025-11-19 11:00")
        .success()
        .stdout(contains("Shift completed: 2.00 h"))
        .stdout(contains("21,428"))
        .stdout(contains("Month 11/2025: 2.00 h | 21,428"));
}

#[test]
fn test_second_session_is_capped_and_third_refused() {
    let db_path = setup_test_db("duty_capped");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-19 09:00").success();
    duty_at(&db_path, "off", "1", "2025-11-19 11:00").success();

    duty_at(&db_path, "on", "1", "2025-11-19 12:00").success();
    duty_at(&db_path, "off", "1", "2025-11-19 15:00")
        .success()
        .stdout(contains("Daily cap reached: 2.00 h"))
        .stdout(contains("Month 11/2025: 4.00 h | 42,856"))
        .stdout(contains("Career total: 42,856"));

    duty_at(&db_path, "on", "1", "2025-11-19 16:00")
        .failure()
        .stdout(contains("Daily cap of 4.00 h reached for 19/11/2025"))
        .stderr(contains("Daily cap reached"));

    // still two sessions on record
    rdl()
        .args(["--db", &db_path, "history", "--user", "1"])
        .assert()
        .success()
        .stdout(contains("09:00:00"))
        .stdout(contains("12:00:00"))
        .stdout(contains("16:00:00").not());
}

#[test]
fn test_cap_resets_next_day() {
    let db_path = setup_test_db("duty_next_day");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-19 08:00").success();
    duty_at(&db_path, "off", "1", "2025-11-19 13:00")
        .success()
        .stdout(contains("Daily cap reached: 4.00 h"));

    duty_at(&db_path, "on", "1", "2025-11-20 08:00").success();
}

#[test]
fn test_off_without_open_session_fails() {
    let db_path = setup_test_db("duty_no_open");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "off", "1", "2025-11-19 10:00")
        .failure()
        .stderr(contains("No open duty session"));

    rdl()
        .args(["--db", &db_path, "history", "--user", "1"])
        .assert()
        .success()
        .stdout(contains("No duty sessions recorded."));
}

#[test]
fn test_double_check_in_fails() {
    let db_path = setup_test_db("duty_double_on");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-19 09:00").success();
    duty_at(&db_path, "on", "1", "2025-11-19 09:05")
        .failure()
        .stderr(contains("already open"));
}

#[test]
fn test_check_off_before_check_in_is_rejected() {
    let db_path = setup_test_db("duty_clock_skew");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-19 09:00").success();
    duty_at(&db_path, "off", "1", "2025-11-19 08:00")
        .failure()
        .stderr(contains("Invalid session timestamp"));

    // the session is still open and can be closed normally
    duty_at(&db_path, "off", "1", "2025-11-19 10:30")
        .success()
        .stdout(contains("Shift completed: 1.50 h"));
}

#[test]
fn test_unknown_member_is_reported() {
    let db_path = setup_test_db("duty_unknown_user");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "42", "2025-11-19 09:00")
        .failure()
        .stderr(contains("User not found: 42"));
}

#[test]
fn test_status_shows_progress() {
    let db_path = setup_test_db("duty_status");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-19 09:00").success();
    duty_at(&db_path, "off", "1", "2025-11-19 10:30").success();
    duty_at(&db_path, "on", "1", "2025-11-19 14:00").success();

    duty_at(&db_path, "status", "1", "2025-11-19 14:30")
        .success()
        .stdout(contains("John Doe (19/11/2025)"))
        .stdout(contains("Completed today : 1.50 h / 4.00 h"))
        .stdout(contains("Remaining       : 2.50 h"))
        .stdout(contains("since 19/11/2025 14:00:00"))
        .stdout(contains("Month 11/2025"));
}

#[test]
fn test_status_for_another_day() {
    let db_path = setup_test_db("duty_status_date");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-19 09:00").success();
    duty_at(&db_path, "off", "1", "2025-11-19 11:00").success();

    rdl()
        .args([
            "--db",
            &db_path,
            "--now",
            "2025-11-25 09:00",
            "status",
            "--user",
            "1",
            "--date",
            "2025-11-19",
        ])
        .assert()
        .success()
        .stdout(contains("Completed today : 2.00 h"));

    rdl()
        .args([
            "--db",
            &db_path,
            "status",
            "--user",
            "1",
            "--date",
            "19/11/2025",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_month_totals() {
    let db_path = setup_test_db("duty_month");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-10-31 09:00").success();
    duty_at(&db_path, "off", "1", "2025-10-31 12:00").success();
    duty_at(&db_path, "on", "1", "2025-11-03 09:00").success();
    duty_at(&db_path, "off", "1", "2025-11-03 10:00").success();

    rdl()
        .args(["--db", &db_path, "month", "--user", "1", "--month", "10/2025"])
        .assert()
        .success()
        .stdout(contains("Hours  : 3.00"))
        .stdout(contains("Salary : 32,142"));

    // current month from the pinned clock
    duty_at(&db_path, "month", "1", "2025-11-20 08:00")
        .success()
        .stdout(contains("11/2025"))
        .stdout(contains("Hours  : 1.00"));

    // months without activity read as zero
    rdl()
        .args(["--db", &db_path, "month", "--user", "1", "--month", "01/2024"])
        .assert()
        .success()
        .stdout(contains("Hours  : 0.00"));

    rdl()
        .args(["--db", &db_path, "month", "--user", "1", "--month", "2025-11"])
        .assert()
        .failure()
        .stderr(contains("Invalid month key"));
}

#[test]
fn test_midnight_crossing_is_filed_under_start_day() {
    let db_path = setup_test_db("duty_midnight");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-30 22:00").success();
    duty_at(&db_path, "off", "1", "2025-12-01 01:00")
        .success()
        .stdout(contains("Shift completed: 3.00 h"))
        .stdout(contains("Month 12/2025: 3.00 h"));

    rdl()
        .args(["--db", &db_path, "history", "--user", "1"])
        .assert()
        .success()
        .stdout(contains("30/11/2025"))
        .stdout(contains("12/2025"));
}

#[test]
fn test_history_groups_newest_day_first() {
    let db_path = setup_test_db("duty_history_order");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-18 09:00").success();
    duty_at(&db_path, "off", "1", "2025-11-18 11:00").success();
    duty_at(&db_path, "on", "1", "2025-11-19 09:00").success();
    duty_at(&db_path, "off", "1", "2025-11-19 11:00").success();

    let out = rdl()
        .args(["--db", &db_path, "history", "--user", "1"])
        .output()
        .expect("run history");
    let stdout = String::from_utf8_lossy(&out.stdout);

    let newer = stdout.find("19/11/2025").expect("newer day listed");
    let older = stdout.find("18/11/2025").expect("older day listed");
    assert!(newer < older, "days not sorted newest first:\n{stdout}");
    assert!(stdout.contains("Career total: 42,856"));
}

#[test]
fn test_audit_log_records_shifts() {
    let db_path = setup_test_db("duty_audit");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-19 09:00").success();
    duty_at(&db_path, "off", "1", "2025-11-19 11:00").success();

    rdl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("check_in"))
        .stdout(contains("check_off"))
        .stdout(contains("completed | 2.00 h | 21,428"));
}

#[test]
fn test_status_figures_come_from_one_record() {
    let db_path = setup_test_db("duty_status_snapshot");
    init_db_with_officer(&db_path);

    duty_at(&db_path, "on", "1", "2025-11-19 09:00").success();
    duty_at(&db_path, "off", "1", "2025-11-19 12:00").success();

    duty_at(&db_path, "status", "1", "2025-11-19 13:00")
        .success()
        .stdout(contains("Completed today : 3.00 h"))
        .stdout(contains("Month 11/2025    : 3.00 h | 32,142"))
        .stdout(contains("Career total    : 32,142"));
}
