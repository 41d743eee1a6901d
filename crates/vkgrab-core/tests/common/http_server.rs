//! Minimal HTTP/1.1 server with scripted replies per path, for curl transport tests.
//!
//! Each request to a path consumes the next scripted reply; the last reply of
//! a path repeats. Unknown paths get 404. Every request path is logged.

use std::collections::{HashMap, VecDeque};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with this body and a matching Content-Length.
    Body(Vec<u8>),
    /// Bare status with an empty body.
    Status(u16),
    /// 200 advertising `length` bytes; sends a little and closes.
    AdvertisedLength(u64),
    /// 200 advertising `length` bytes, sent 1 KiB every `interval_ms`.
    Trickle { length: u64, interval_ms: u64 },
}

pub struct TestServer {
    pub base_url: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Number of requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.log.lock().unwrap().iter().filter(|p| p.as_str() == path).count()
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(routes: Vec<(&str, Vec<Reply>)>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: HashMap<String, VecDeque<Reply>> = routes
        .into_iter()
        .map(|(p, r)| (p.to_string(), r.into()))
        .collect();
    let routes = Arc::new(Mutex::new(routes));
    let log = Arc::new(Mutex::new(Vec::new()));
    let server_log = Arc::clone(&log);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&server_log);
            thread::spawn(move || handle(stream, &routes, &log));
        }
    });
    TestServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        log,
    }
}

fn next_reply(routes: &Mutex<HashMap<String, VecDeque<Reply>>>, path: &str) -> Reply {
    let mut routes = routes.lock().unwrap();
    match routes.get_mut(path) {
        Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
        Some(queue) => queue.front().cloned().unwrap_or(Reply::Status(404)),
        None => Reply::Status(404),
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &Mutex<HashMap<String, VecDeque<Reply>>>,
    log: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(path.clone());

    match next_reply(routes, &path) {
        Reply::Body(body) => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
        }
        Reply::Status(code) => {
            let head = format!(
                "HTTP/1.1 {} Scripted\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                code
            );
            let _ = stream.write_all(head.as_bytes());
        }
        Reply::AdvertisedLength(length) => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                length
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&[0u8; 1024]);
        }
        Reply::Trickle { length, interval_ms } => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                length
            );
            if stream.write_all(head.as_bytes()).is_err() {
                return;
            }
            let mut sent = 0u64;
            while sent < length {
                let n = (length - sent).min(1024) as usize;
                if stream.write_all(&vec![b'x'; n]).is_err() {
                    return;
                }
                sent += n as u64;
                thread::sleep(std::time::Duration::from_millis(interval_ms));
            }
        }
    }
}
