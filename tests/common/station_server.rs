//! In-memory station endpoint for integration tests.
//!
//! Speaks just enough HTTP/1.1 for reqwest: one request per connection, JSON
//! bodies, `Connection: close`. Stations live in memory and every request is
//! recorded so tests can assert on method, path, headers and body.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Path the collection is mounted on
pub const COLLECTION_PATH: &str = "/api/stations/";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names lowercased
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct State {
    stations: Vec<Value>,
    next_id: u64,
    requests: Vec<RecordedRequest>,
    /// When set, every request is answered with this status
    fail_with: Option<u16>,
}

#[derive(Clone)]
pub struct StationServer {
    base_url: String,
    state: Arc<Mutex<State>>,
}

impl StationServer {
    /// Starts serving `stations` in a background thread until the process exits
    pub fn start(stations: Vec<Value>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(State {
            stations,
            next_id: 100,
            ..State::default()
        }));

        let shared = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&shared);
                thread::spawn(move || handle(stream, &state));
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    /// Endpoint with trailing slash, ready for `AppConfig::with_endpoint`
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, COLLECTION_PATH)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn stations(&self) -> Vec<Value> {
        self.state.lock().unwrap().stations.clone()
    }

    pub fn fail_with(&self, status: Option<u16>) {
        self.state.lock().unwrap().fail_with = status;
    }
}

fn handle(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let Some(request) = read_request(&mut stream) else {
        return;
    };
    let (status, body) = {
        let mut state = state.lock().unwrap();
        let answer = match state.fail_with {
            Some(status) => (status, json!({"error": "forced failure"}).to_string()),
            None => route(&mut state, &request),
        };
        state.requests.push(request);
        answer
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn route(state: &mut State, request: &RecordedRequest) -> (u16, String) {
    let Some(rest) = request.path.strip_prefix(COLLECTION_PATH) else {
        return (404, String::new());
    };

    match (request.method.as_str(), rest) {
        ("GET", "") => (200, Value::Array(state.stations.clone()).to_string()),
        ("POST", "") => {
            let mut station = request.json();
            station["id"] = json!(state.next_id);
            state.next_id += 1;
            state.stations.push(station.clone());
            (201, station.to_string())
        }
        ("PUT", id) if !id.is_empty() => match position(state, id) {
            Some(index) => {
                let mut station = request.json();
                station["id"] = state.stations[index]["id"].clone();
                state.stations[index] = station.clone();
                (200, station.to_string())
            }
            None => (404, String::new()),
        },
        ("DELETE", id) if !id.is_empty() => match position(state, id) {
            Some(index) => {
                state.stations.remove(index);
                (204, String::new())
            }
            None => (404, String::new()),
        },
        _ => (405, String::new()),
    }
}

fn position(state: &State, id: &str) -> Option<usize> {
    state.stations.iter().position(|s| match &s["id"] {
        Value::String(s) => s == id,
        other => other.to_string() == id,
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Error",
    }
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = std::str::from_utf8(&buf[..header_end]).ok()?;
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let mut headers = HashMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    while buf.len() < header_end + length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let end = (header_end + length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end..end]).into_owned();

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
