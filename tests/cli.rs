use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("bestbuy_availability_checker").unwrap()
}

fn serve(status_line: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status_line}\r\n\
         Content-Type: text/html\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let _ = stream.read(&mut buf);
        let _ = stream.write_all(response.as_bytes());
    });
    format!("http://{addr}/en-ca/product/14575597")
}

const AVAILABLE_PAGE: &str = r#"<div class="x-pdp-availability-online">
  <span>Online:</span><span>Available to ship</span>
</div>"#;

#[test]
fn help_describes_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("availability of a product"));
}

#[test]
fn malformed_url_is_an_invocation_failure() {
    cmd()
        .arg("not-a-url")
        .assert()
        .failure()
        .stderr(contains("well-formed"));
}

#[test]
fn available_product_prints_status_line() {
    let url = serve("200 OK", AVAILABLE_PAGE);
    cmd()
        .arg(&url)
        .assert()
        .success()
        .stdout(contains("AVAILABLE - Available to ship"));
}

#[test]
fn error_status_still_exits_zero() {
    // The check itself succeeded; only invocation failures are non-zero.
    let url = serve("404 Not Found", "gone");
    cmd().arg(&url).assert().success().stdout(contains("ERROR"));
}

#[test]
fn json_output_is_machine_readable() {
    let url = serve("200 OK", AVAILABLE_PAGE);
    let output = cmd().args([url.as_str(), "--json"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["status"], "AVAILABLE");
    assert_eq!(value["source_url"], url);
    assert!(value["checked_at"].is_string());
}

#[test]
fn event_payload_drives_the_trigger_path() {
    let url = serve("200 OK", AVAILABLE_PAGE);
    let payload = format!(r#"{{"url": "{url}"}}"#);
    cmd()
        .args(["--event", payload.as_str()])
        .assert()
        .success()
        .stdout(contains("AVAILABLE"));
}

#[test]
fn malformed_event_payload_fails() {
    cmd()
        .args(["--event", "not json"])
        .assert()
        .failure()
        .stderr(contains("trigger payload"));
}

#[test]
fn marker_config_override_is_honored() {
    let dir = std::env::temp_dir().join(format!("markers-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("markers.json");
    std::fs::write(
        &path,
        r#"{
            "container_selector": "div.stock",
            "marker_selector": "p",
            "available_phrases": ["add to cart"],
            "unavailable_phrases": ["notify me"]
        }"#,
    )
    .unwrap();

    let url = serve("200 OK", "<div class=\"stock\"><p>Notify me when back</p></div>");
    cmd()
        .args([url.as_str(), "--markers", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("UNAVAILABLE - Notify me when back"));
}
