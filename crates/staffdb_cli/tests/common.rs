#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use std::path::Path;

pub fn staffdb(db: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("staffdb");
    cmd.arg("--db").arg(db);
    cmd
}
