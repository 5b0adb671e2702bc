use assert_cmd::Command;

#[test]
fn help_exits_cleanly() {
    let mut cmd = Command::cargo_bin("pagenav").unwrap();
    cmd.arg("--help").assert().success();
}

#[test]
fn rejects_unknown_heading_level() {
    let mut cmd = Command::cargo_bin("pagenav").unwrap();
    cmd.args(["-l", "h7"]).assert().failure();
}

#[test]
fn refuses_to_run_without_a_tty() {
    // assert_cmd pipes stdin, so the tty guard trips before the TUI starts
    let mut cmd = Command::cargo_bin("pagenav").unwrap();
    cmd.assert().failure().code(2);
}
