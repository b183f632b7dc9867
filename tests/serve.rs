//! End-to-end tests: a real listener on an ephemeral port, raw HTTP/1.1 over TCP.

use static_server::config::{AppState, Config};
use static_server::http::cache::CACHEABLE_EXTENSIONS;
use static_server::http::mime::MIME_TYPES;
use static_server::http::NOT_FOUND_BODY;
use static_server::server;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    root: PathBuf,
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    async fn start(name: &str, files: &[(&str, &str)]) -> Self {
        let root = std::env::temp_dir().join(format!(
            "static-server-it-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        for (file, contents) in files {
            let path = root.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, contents).unwrap();
        }

        let mut config = Config::load_from("definitely/not/a/config/file").unwrap();
        config.site.root = root.to_string_lossy().into_owned();
        config.logging.access_log = false;

        // Plain bind: reuse flags could let parallel tests share a port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::new(&config));

        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(server::start_server_loop(listener, state, async move {
            let _ = stopped.await;
        }));

        Self {
            addr,
            root,
            stop: Some(stop),
            handle,
        }
    }

    async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.handle.await.unwrap().unwrap();
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

struct RawResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

async fn request(addr: SocketAddr, method: &str, path: &str) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    );
    stream.write_all(req.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();

    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a header terminator");
    let head = String::from_utf8(raw[..split].to_vec()).unwrap();
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status = lines
        .next()
        .and_then(|l| l.split(' ').nth(1))
        .and_then(|s| s.parse().ok())
        .unwrap();
    let headers = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    RawResponse {
        status,
        headers,
        body,
    }
}

#[tokio::test]
async fn test_every_table_extension() {
    let names: Vec<String> = MIME_TYPES.iter().map(|(ext, _)| format!("file{ext}")).collect();
    let files: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), n.as_str())).collect();
    let srv = TestServer::start("table", &files).await;

    for (ext, content_type) in MIME_TYPES {
        let name = format!("file{ext}");
        let resp = request(srv.addr, "GET", &format!("/{name}")).await;
        assert_eq!(resp.status, 200, "{ext}");
        assert_eq!(resp.headers["content-type"], *content_type, "{ext}");
        assert_eq!(resp.body, name.as_bytes(), "{ext}");

        let cache = resp.headers.get("cache-control").map(String::as_str);
        if CACHEABLE_EXTENSIONS.contains(ext) {
            assert_eq!(cache, Some("public, max-age=31536000"), "{ext}");
        } else {
            assert_eq!(cache, None, "{ext}");
        }
    }

    srv.stop().await;
}

#[tokio::test]
async fn test_unknown_extension_and_case() {
    let srv = TestServer::start(
        "case",
        &[("blob.xyz", "xyz"), ("Banner.PNG", "upper"), ("icon.png", "lower")],
    )
    .await;

    let unknown = request(srv.addr, "GET", "/blob.xyz").await;
    assert_eq!(unknown.status, 200);
    assert_eq!(unknown.headers["content-type"], "application/octet-stream");
    assert!(!unknown.headers.contains_key("cache-control"));

    let upper = request(srv.addr, "GET", "/Banner.PNG").await;
    let lower = request(srv.addr, "GET", "/icon.png").await;
    assert_eq!(upper.headers["content-type"], lower.headers["content-type"]);
    assert_eq!(upper.headers["cache-control"], lower.headers["cache-control"]);
    assert_eq!(upper.body, b"upper");

    srv.stop().await;
}

#[tokio::test]
async fn test_root_and_not_found() {
    let srv = TestServer::start("root", &[("index.html", "<h1>Academia</h1>")]).await;

    let root = request(srv.addr, "GET", "/").await;
    let index = request(srv.addr, "GET", "/index.html").await;
    assert_eq!(root.status, 200);
    assert_eq!(root.headers["content-type"], "text/html");
    assert_eq!(root.body, index.body);
    assert_eq!(root.headers.get("cache-control"), index.headers.get("cache-control"));

    for path in ["/missing.html", "/nested/dir/", "/../etc/passwd"] {
        let resp = request(srv.addr, "GET", path).await;
        assert_eq!(resp.status, 404, "{path}");
        assert_eq!(resp.headers["content-type"], "text/html", "{path}");
        assert_eq!(resp.body, NOT_FOUND_BODY.as_bytes(), "{path}");
    }

    srv.stop().await;
}

#[tokio::test]
async fn test_method_does_not_matter() {
    let srv = TestServer::start("methods", &[("app.js", "let x = 1;")]).await;

    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        let resp = request(srv.addr, method, "/app.js").await;
        assert_eq!(resp.status, 200, "{method}");
        assert_eq!(resp.headers["content-type"], "application/javascript", "{method}");
        assert_eq!(resp.body, b"let x = 1;", "{method}");
    }

    srv.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_independent() {
    let names: Vec<String> = (0..32).map(|i| format!("page{i}.json")).collect();
    let bodies: Vec<String> = (0..32).map(|i| format!("{{\"page\":{i}}}")).collect();
    let files: Vec<(&str, &str)> = names
        .iter()
        .zip(&bodies)
        .map(|(n, b)| (n.as_str(), b.as_str()))
        .collect();
    let srv = TestServer::start("concurrent", &files).await;

    let tasks: Vec<_> = names
        .iter()
        .zip(&bodies)
        .map(|(name, body)| {
            let addr = srv.addr;
            let path = format!("/{name}");
            let expected = body.clone();
            tokio::spawn(async move {
                let resp = request(addr, "GET", &path).await;
                assert_eq!(resp.status, 200);
                assert_eq!(resp.headers["content-type"], "application/json");
                assert_eq!(resp.body, expected.as_bytes());
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    srv.stop().await;
}

#[tokio::test]
async fn test_shutdown_closes_listener() {
    let srv = TestServer::start("shutdown", &[("index.html", "hi")]).await;
    let addr = srv.addr;

    assert_eq!(request(addr, "GET", "/").await.status, 200);
    srv.stop().await;

    assert!(TcpStream::connect(addr).await.is_err());
}
