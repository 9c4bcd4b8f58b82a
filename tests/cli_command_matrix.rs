use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

fn run_help(home: &TempDir, args: &[&str]) {
    let mut cmd = cargo_bin_cmd!("ward-aqi");
    cmd.env("HOME", home.path())
        .args(args)
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn every_cli_command_has_help_path() {
    let home = TempDir::new().expect("temp home");

    run_help(&home, &[]);

    run_help(&home, &["init"]);
    run_help(&home, &["zones"]);
    run_help(&home, &["wards"]);
    run_help(&home, &["fetch"]);
    run_help(&home, &["record"]);
    run_help(&home, &["history"]);
    run_help(&home, &["predict"]);
    run_help(&home, &["classify"]);
    run_help(&home, &["rank"]);
    run_help(&home, &["dashboard"]);
}
