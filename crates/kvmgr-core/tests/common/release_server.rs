//! Minimal HTTP/1.1 server for install pipeline tests.
//!
//! Serves one static response for every GET and records each request target,
//! so tests can assert on the exact artifact path requested, or on no
//! request having been made at all.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Handle to a running test server.
pub struct ReleaseServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ReleaseServer {
    /// Base URL without a trailing slash (e.g. `http://127.0.0.1:41234`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request targets seen so far, in order (e.g. `/1.18.0/bin/linux/amd64/kubectl`).
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server answering `200 OK` with `body` for every request.
pub fn serve_ok(body: Vec<u8>) -> ReleaseServer {
    serve("200 OK", "application/octet-stream", body)
}

/// Starts a server answering `404 Not Found` with an HTML error page, the
/// way the release mirror answers for a version that does not exist.
pub fn serve_not_found() -> ReleaseServer {
    let page = b"<html><head><title>404 Not Found</title></head>\
<body>The specified key does not exist.</body></html>"
        .to_vec();
    serve("404 Not Found", "text/html", page)
}

/// Starts a server in a background thread. Every connection gets the same
/// status, content type and body; the server runs until the process exits.
pub fn serve(status: &'static str, content_type: &'static str, body: Vec<u8>) -> ReleaseServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, status, content_type, &body, &seen));
        }
    });
    ReleaseServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    status: &str,
    content_type: &str,
    body: &[u8],
    seen: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    if let Some(target) = request_target(request) {
        seen.lock().unwrap().push(target.to_string());
    }
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

/// Second token of the request line (`GET /path HTTP/1.1` → `/path`).
fn request_target(request: &str) -> Option<&str> {
    request.lines().next()?.split_whitespace().nth(1)
}
