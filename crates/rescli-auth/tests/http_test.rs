//! Auth client tests against a local one-shot HTTP server.
//!
//! Each test binds an ephemeral port, serves exactly one canned response,
//! and hands back the raw request so the wire format can be checked.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use rescli_auth::client::AuthClient;
use rescli_auth::outcome::{AuthOutcome, FailureReason};
use rescli_auth::password;
use rescli_common::error::ResCliError;
use rescli_common::types::PasswordTransport;

/// Request captured by the canned server.
struct Captured {
    head: String,
    body: String,
}

fn serve_once(status: u16, reason: &str, body: &str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept failed");
        let mut reader = BufReader::new(stream);
        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            let _ = reader.read_line(&mut line).expect("read failed");
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().expect("bad content-length");
            }
            if line == "\r\n" || line.is_empty() {
                break;
            }
            head.push_str(&line);
        }
        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).expect("read body failed");

        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).expect("write failed");
        stream.flush().expect("flush failed");
        Captured {
            head,
            body: String::from_utf8(body).expect("body not utf-8"),
        }
    });

    (format!("http://{addr}"), handle)
}

/// Returns a URL on which nothing is listening.
fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    drop(listener);
    format!("http://{addr}")
}

fn client(base_url: &str, policy: PasswordTransport) -> AuthClient {
    let http = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .expect("client build failed");
    AuthClient::with_client(http, base_url, policy)
}

fn reason(outcome: &AuthOutcome) -> Option<FailureReason> {
    match outcome {
        AuthOutcome::Success { .. } => None,
        AuthOutcome::Failure { reason, .. } => Some(*reason),
    }
}

#[test]
fn login_success_posts_credentials_to_get_user() {
    let (url, server) = serve_once(200, "OK", r#"{"success": true}"#);
    let outcome = client(&url, PasswordTransport::Sha256).login("bob@example.com", "pw");

    assert!(outcome.is_success(), "unexpected outcome: {outcome:?}");
    let captured = server.join().expect("server panicked");
    assert!(captured.head.starts_with("POST /getUser HTTP/1.1"));
    let json: serde_json::Value = serde_json::from_str(&captured.body).expect("body not JSON");
    assert_eq!(json["email"], "bob@example.com");
    assert_eq!(json["password"], password::encode(PasswordTransport::Sha256, "pw"));
}

#[test]
fn login_rejected_body_is_invalid_credentials() {
    let (url, server) = serve_once(200, "OK", r#"{"success": false}"#);
    let outcome = client(&url, PasswordTransport::Plain).login("bob", "pw");
    let _ = server.join().expect("server panicked");
    assert_eq!(reason(&outcome), Some(FailureReason::InvalidCredentials));
}

#[test]
fn login_500_is_server_error() {
    let (url, server) = serve_once(500, "Internal Server Error", "{}");
    let outcome = client(&url, PasswordTransport::Plain).login("bob", "pw");
    let _ = server.join().expect("server panicked");
    assert_eq!(reason(&outcome), Some(FailureReason::ServerError));
}

#[test]
fn login_connection_refused_is_transport_error() {
    let outcome = client(&refused_url(), PasswordTransport::Plain).login("bob", "pw");
    assert_eq!(reason(&outcome), Some(FailureReason::TransportError));
}

#[test]
fn login_and_sign_up_send_the_same_password_encoding() {
    let (url, server) = serve_once(200, "OK", "{}");
    let _ = client(&url, PasswordTransport::Sha256).sign_up("eve@example.com", "pw");
    let sign_up_body = server.join().expect("server panicked").body;

    let (url, server) = serve_once(200, "OK", r#"{"success": true}"#);
    let _ = client(&url, PasswordTransport::Sha256).login("eve@example.com", "pw");
    let login_body = server.join().expect("server panicked").body;

    assert_eq!(sign_up_body, login_body);
}

#[test]
fn sign_up_200_is_success_with_welcome() {
    let (url, server) = serve_once(200, "OK", "{}");
    let outcome = client(&url, PasswordTransport::Sha256).sign_up("carol@example.com", "pw");

    let captured = server.join().expect("server panicked");
    assert!(captured.head.starts_with("POST /setUser HTTP/1.1"));
    assert_eq!(
        outcome,
        AuthOutcome::Success {
            identity: "carol@example.com".into(),
            message: "Sign up successful. Welcome, carol@example.com!".into(),
        }
    );
}

#[test]
fn sign_up_409_is_conflict() {
    let (url, server) = serve_once(409, "Conflict", "{}");
    let outcome = client(&url, PasswordTransport::Sha256).sign_up("carol@example.com", "pw");
    let _ = server.join().expect("server panicked");
    assert_eq!(reason(&outcome), Some(FailureReason::Conflict));
    assert!(outcome.message().contains("carol@example.com"));
}

#[test]
fn sign_up_connection_refused_embeds_error_text() {
    let outcome = client(&refused_url(), PasswordTransport::Sha256).sign_up("x@y.z", "pw");
    assert_eq!(reason(&outcome), Some(FailureReason::TransportError));
    assert!(outcome.message().len() > "Sign up failed. ".len());
}

#[test]
fn health_check_returns_body_on_200() {
    let (url, server) = serve_once(200, "OK", "pong");
    let body = client(&url, PasswordTransport::Plain)
        .health_check()
        .expect("health check failed");
    let captured = server.join().expect("server panicked");
    assert!(captured.head.starts_with("GET /test HTTP/1.1"));
    assert_eq!(body, "pong");
}

#[test]
fn health_check_non_200_is_rejected_with_status() {
    let (url, server) = serve_once(503, "Service Unavailable", "down");
    let err = client(&url, PasswordTransport::Plain).health_check().unwrap_err();
    let _ = server.join().expect("server panicked");
    assert!(matches!(err, ResCliError::Rejected { status: 503, .. }));
}

#[test]
fn health_check_connection_refused_is_transport() {
    let err = client(&refused_url(), PasswordTransport::Plain)
        .health_check()
        .unwrap_err();
    assert!(matches!(err, ResCliError::Transport { .. }));
}
