#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

pub const SEED_ROW: &str = "150,155,160,165,170";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub wards: PathBuf,
    pub history: PathBuf,
    pub config: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let data = tmp.path().join("data");
        fs::create_dir_all(&data).expect("create data dir");
        let wards = make_fixture_wards(&data);
        let history = data.join("aqi_history.csv");

        let config = tmp.path().join("config.toml");
        write_config(&config, "http://127.0.0.1:9/feed/delhi/", Some("test-token"), 0);

        Self {
            _tmp: tmp,
            home,
            wards,
            history,
            config,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ward-aqi");
        cmd.env("HOME", &self.home)
            .env_remove("WARD_AQI_TOKEN")
            .env_remove("WARD_AQI_LOG")
            .arg("--config")
            .arg(&self.config)
            .arg("--wards")
            .arg(&self.wards)
            .arg("--history")
            .arg(&self.history);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }

    pub fn history_text(&self) -> String {
        fs::read_to_string(&self.history).expect("read history file")
    }

    pub fn write_history(&self, rows: &[&str]) {
        let mut raw = String::from("ward_no,day1,day2,day3,day4,day5\n");
        for r in rows {
            raw.push_str(r);
            raw.push('\n');
        }
        fs::write(&self.history, raw).expect("write history file");
    }
}

pub fn write_config(path: &Path, endpoint: &str, token: Option<&str>, refresh_secs: u64) {
    let token_line = token
        .map(|t| format!("token = \"{}\"\n", t))
        .unwrap_or_default();
    fs::write(
        path,
        format!(
            "[provider]\nendpoint = \"{}\"\n{}timeout_ms = 1000\n\n[dashboard]\nrefresh_secs = {}\ntop = 10\n",
            endpoint, token_line, refresh_secs
        ),
    )
    .expect("write config");
}

fn make_fixture_wards(base: &Path) -> PathBuf {
    let path = base.join("wards.csv");
    fs::write(
        &path,
        "ward_no,ward_name,zone\n\
         1,Narela,North\n\
         2,Bawana,North\n\
         3,Model Town,Central\n\
         4,Karol Bagh,Central\n\
         5,Saket,South\n\
         6,Model Town,North\n",
    )
    .expect("write wards");
    path
}

/// Serves one WAQI feed response on a loopback port and returns the endpoint.
pub fn serve_feed_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind feed server");
    let endpoint = format!("http://{}/feed/delhi/", listener.local_addr().expect("addr"));
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    endpoint
}

/// Accepts one connection and never answers it.
pub fn silent_feed() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind feed server");
    let endpoint = format!("http://{}/feed/delhi/", listener.local_addr().expect("addr"));
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(Duration::from_secs(5));
            drop(stream);
        }
    });
    endpoint
}
