//! Minimal loopback HTTP server for reporter tests.
//!
//! Answers each accepted connection with the next scripted status and
//! forwards the request body to the test through a channel.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

pub const PATH: &str = "/api/temp/insert";

pub struct StubServer {
    addr: SocketAddr,
    bodies: Receiver<String>,
}

#[allow(dead_code)]
impl StubServer {
    /// Serve one connection per entry in `statuses`, in order.
    pub fn start(statuses: Vec<u16>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for status in statuses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                respond(stream, status, &tx);
            }
        });

        Self { addr, bodies: rx }
    }

    /// Accept up to `connections` connections and never answer them.
    pub fn silent(connections: usize, hold: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (_tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming().take(connections) {
                held.push(stream);
            }
            thread::sleep(hold);
        });

        Self { addr, bodies: rx }
    }

    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, PATH)
    }

    pub fn next_body(&self, timeout: Duration) -> Option<String> {
        self.bodies.recv_timeout(timeout).ok()
    }
}

/// Endpoint on a port nobody listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, PATH)
}

fn respond(mut stream: TcpStream, status: u16, bodies: &Sender<String>) {
    let body = read_request_body(&mut stream);
    let _ = bodies.send(body);

    let (reason, reply) = match status {
        200 => ("OK", "ok"),
        500 => ("Internal Server Error", "database unavailable"),
        _ => ("Error", "error"),
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        reply.len(),
        reply
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn read_request_body(stream: &mut TcpStream) -> String {
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return String::new(),
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let end = buf.len().min(header_end + content_length);
    String::from_utf8_lossy(&buf[header_end..end]).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
