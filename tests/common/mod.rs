#![allow(dead_code)]

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use vpc_egress_probe::probe::dns::HostResolver;
use vpc_egress_probe::probe::error::ProbeError;

/// Resolver answering from a fixed table.
pub struct StaticResolver(pub HashMap<String, Ipv4Addr>);

impl StaticResolver {
    pub fn all_local(hosts: &[&str]) -> Self {
        Self(hosts.iter().map(|h| (h.to_string(), Ipv4Addr::LOCALHOST)).collect())
    }
}

impl HostResolver for StaticResolver {
    async fn lookup_ipv4(&self, host: &str) -> Result<Ipv4Addr, ProbeError> {
        self.0
            .get(host)
            .copied()
            .ok_or_else(|| ProbeError::ResolutionFailed {
                host: host.to_string(),
                reason: "NXDOMAIN".to_string(),
            })
    }
}

pub fn plain_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

pub fn json_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

async fn read_head(socket: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&head).to_string()
}

/// HTTP server answering one connection per canned response, in order.
/// The join handle yields the request heads it received.
pub async fn canned_server(responses: Vec<String>) -> (SocketAddr, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            seen.push(read_head(&mut socket).await);
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
        seen
    });
    (addr, handle)
}

/// Server that accepts connections and never answers.
pub async fn silent_server() -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    (addr, handle)
}

/// TCP endpoint that answers anything with a short HTTP error, like a TLS port
/// receiving plaintext.
pub async fn tcp_responder() -> (u16, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let _ = read_head(&mut socket).await;
            let _ = socket.write_all(b"HTTP/1.1 400 Bad Request\r\n\r\n").await;
        }
    });
    (port, handle)
}
