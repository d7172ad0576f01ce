//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use edge_server::config::ServerConfig;
use edge_server::lifecycle::Shutdown;
use edge_server::net::Listener;
use edge_server::HttpServer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A fresh static root under the system temp dir, with a `static/` subdirectory.
pub fn scratch_root() -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "edge-server-it-{}-{}",
        std::process::id(),
        DIR_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::create_dir_all(dir.join("static")).unwrap();
    dir
}

/// A loopback port with nothing listening on it.
pub fn dead_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Config bound to an ephemeral loopback port.
pub fn test_config(static_root: PathBuf, backend_port: u16) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.bind_host = "127.0.0.1".into();
    config.listener.port = 0;
    config.static_files.root = static_root;
    config.backend.host = "127.0.0.1".into();
    config.backend.port = backend_port;
    config
}

/// A running server plus the handle needed to stop it.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<()>,
}

impl RunningServer {
    pub async fn stop(self) {
        self.shutdown.trigger();
        self.task.await.unwrap();
    }
}

/// Bind and start the server in the background.
pub fn start_server(config: ServerConfig) -> RunningServer {
    let listener = Listener::bind(&config.listener).unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config);

    let task = tokio::spawn(async move {
        server.serve(listener, rx).await.unwrap();
    });

    RunningServer {
        addr,
        shutdown,
        task,
    }
}

/// Send raw bytes in one write and collect the whole reply.
pub async fn send_raw(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();
    reply
}

/// Split a serialized response into (status code, body).
pub fn split_response(reply: &[u8]) -> (u16, Vec<u8>) {
    let text = String::from_utf8_lossy(reply);
    let status = text
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap();
    let pos = reply
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .unwrap();
    (status, reply[pos + 4..].to_vec())
}

/// Start a mock backend that records each request and replies with `reply`.
pub async fn start_recording_backend(
    reply: &'static [u8],
) -> (SocketAddr, Arc<Mutex<Vec<Vec<u8>>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let mut buf = vec![0u8; 4096];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    buf.truncate(n);
                    log.lock().unwrap().push(buf);
                    let _ = socket.write_all(reply).await;
                    let _ = socket.shutdown().await;
                }
                Err(_) => break,
            }
        }
    });

    (addr, seen)
}
