//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers every request with one canned status and body, and records what
//! it received (method, target, headers, body) so tests can assert on the
//! exact wire request.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct ProbeServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ProbeServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// How the response body is written after the headers.
#[derive(Debug, Clone, Copy)]
pub enum Pacing {
    /// The whole body at once.
    Immediate,
    /// One byte at a time with a pause between bytes.
    Trickle(Duration),
    /// The first `n` bytes, then silence for the given time.
    StallAfter(usize, Duration),
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(status: u16, body: Vec<u8>) -> ProbeServer {
    start_paced(status, body, Pacing::Immediate)
}

/// Like [`start`], but writes the body according to `pacing`.
pub fn start_paced(status: u16, body: Vec<u8>, pacing: Pacing) -> ProbeServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, status, &body, pacing, &recorded));
        }
    });
    ProbeServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(
    mut stream: TcpStream,
    status: u16,
    body: &[u8],
    pacing: Pacing,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let head_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("").to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim_start().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let mut req_body = buf[head_end + 4..].to_vec();
    while req_body.len() < content_length {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => req_body.extend_from_slice(&chunk[..n]),
        }
    }

    recorded.lock().unwrap().push(RecordedRequest {
        method,
        target,
        headers,
        body: req_body,
    });

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    match pacing {
        Pacing::Immediate => {
            let _ = stream.write_all(body);
        }
        Pacing::Trickle(gap) => {
            for byte in body {
                let sent = stream
                    .write_all(std::slice::from_ref(byte))
                    .and_then(|()| stream.flush());
                if sent.is_err() {
                    return;
                }
                thread::sleep(gap);
            }
        }
        Pacing::StallAfter(n, pause) => {
            let n = n.min(body.len());
            let _ = stream.write_all(&body[..n]);
            let _ = stream.flush();
            thread::sleep(pause);
            let _ = stream.write_all(&body[n..]);
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
