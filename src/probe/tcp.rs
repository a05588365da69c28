use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::prelude::*;
use crate::config::model::TcpSettings;

/// Opens a TCP connection, giving up after `limit`.
pub async fn connect(addr: SocketAddr, limit: Duration) -> Result<TcpStream, ProbeError> {
    match timeout(limit, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(e)) => Err(ProbeError::ConnectFailed {
            addr,
            code: e.raw_os_error(),
            reason: e.kind().to_string(),
        }),
        Err(_) => Err(ProbeError::ConnectFailed {
            addr,
            code: None,
            reason: format!("timed out after {}ms", limit.as_millis()),
        }),
    }
}

/// Sends a bare HTTP/1.0 request over an established stream and waits for the
/// first byte of the answer. Returns the byte, or `None` if the peer closed.
pub async fn exchange_raw_http(
    stream: &mut TcpStream,
    addr: SocketAddr,
    host: &str,
    write_limit: Duration,
    read_limit: Duration,
) -> Result<Option<u8>, ProbeError> {
    let io_failed = |reason: String| ProbeError::IoFailed { addr, reason };

    let request = format!("GET / HTTP/1.0\r\nHost: {host}\r\n\r\n");
    match timeout(write_limit, stream.write_all(request.as_bytes())).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(io_failed(e.to_string())),
        Err(_) => {
            return Err(io_failed(format!(
                "write timed out after {}ms",
                write_limit.as_millis()
            )));
        }
    }
    log::debug!("Sent HTTP request to {addr}");

    let mut first = [0u8; 1];
    match timeout(read_limit, stream.read(&mut first)).await {
        Ok(Ok(0)) => Ok(None),
        Ok(Ok(_)) => Ok(Some(first[0])),
        Ok(Err(e)) => Err(io_failed(e.to_string())),
        Err(_) => Err(io_failed(format!(
            "read timed out after {}ms",
            read_limit.as_millis()
        ))),
    }
}

/// Runs the TCP phase over every resolved endpoint.
///
/// Each endpoint yields exactly one `Tcp` entry. When the connect succeeds a
/// `HttpRaw` entry follows it; a failure there is only a warning and leaves the
/// `Tcp` entry successful.
pub async fn probe_endpoints(
    endpoints: &[ResolvedEndpoint],
    settings: &TcpSettings,
    detail_width: usize,
    probes: &mut ProbeLog,
) {
    log::info!("=== TCP Connection Tests ===");
    let connect_limit = Duration::from_millis(settings.connect_timeout_ms);
    let read_limit = Duration::from_millis(settings.read_timeout_ms);

    for endpoint in endpoints {
        let host = endpoint.hostname.as_str();
        let addr = SocketAddr::from((endpoint.resolved_address, settings.port));
        log::info!("Testing TCP connection to {host} ({addr})");

        let start = Instant::now();
        let connected = connect(addr, connect_limit).await;
        let duration = start.elapsed().as_secs_f64();

        let mut stream = match connected {
            Ok(stream) => stream,
            Err(e) => {
                log::warn!("Failed to connect to {host} ({addr}): {e}");
                probes.push(ProbeResult {
                    step_kind: StepKind::Tcp,
                    target: host.to_string(),
                    success: false,
                    duration_seconds: duration,
                    detail: e.to_string(),
                });
                continue;
            }
        };

        log::info!("Connected to {host} ({addr}) in {duration:.2}s");
        probes.push(ProbeResult {
            step_kind: StepKind::Tcp,
            target: host.to_string(),
            success: true,
            duration_seconds: duration,
            detail: format!("connected to {addr}"),
        });

        let start = Instant::now();
        let exchanged = exchange_raw_http(&mut stream, addr, host, connect_limit, read_limit).await;
        let duration = start.elapsed().as_secs_f64();

        let (success, detail) = match exchanged {
            Ok(Some(byte)) => {
                log::info!("Received response from {host}");
                let shown = char::from(byte).to_string();
                (
                    true,
                    format!("first response byte: {}", super::excerpt(&shown, detail_width)),
                )
            }
            Ok(None) => {
                log::warn!("{host} closed the connection without responding");
                (false, "warning: connection closed before any response byte".to_string())
            }
            Err(e) => {
                log::warn!("Failed to communicate after connection: {e}");
                (false, format!("warning: {e}"))
            }
        };
        probes.push(ProbeResult {
            step_kind: StepKind::HttpRaw,
            target: host.to_string(),
            success,
            duration_seconds: duration,
            detail,
        });

        if let Err(e) = stream.shutdown().await {
            log::debug!("Shutdown of {addr} failed: {e}");
        }
    }
}
