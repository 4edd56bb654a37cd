#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rdl() -> Command {
    cargo_bin_cmd!("rdutylog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdutylog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB (schema only, config file untouched)
pub fn init_db(db_path: &str) {
    rdl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Register an Officer (10,714/h). The first member of a fresh DB gets id 1.
pub fn add_officer(db_path: &str, username: &str, name: &str) {
    rdl()
        .args([
            "--db",
            db_path,
            "user",
            "add",
            "--username",
            username,
            "--name",
            name,
            "--position",
            "Officer",
        ])
        .assert()
        .success();
}

/// Run a duty command (`on`, `off`, ...) for member `user` at a pinned local time.
pub fn duty_at(db_path: &str, cmd: &str, user: &str, now: &str) -> assert_cmd::assert::Assert {
    rdl()
        .args(["--db", db_path, "--now", now, cmd, "--user", user])
        .assert()
}

/// Fresh DB with one Officer registered as member #1
pub fn init_db_with_officer(db_path: &str) {
    init_db(db_path);
    add_officer(db_path, "jdoe", "John Doe");
}
