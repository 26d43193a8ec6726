//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use vvault_landing::config::LandingConfig;
use vvault_landing::http::newsletter::InFlight;
use vvault_landing::signup::{ContactStore, MemoryStore, NewContact, StoreError};
use vvault_landing::{HttpServer, Shutdown};

pub const ENGLISH_PAGE: &str = "<html lang=\"en\">vvault</html>";
pub const FRENCH_PAGE: &str = "<html lang=\"fr\">vvault</html>";

/// A running server on an ephemeral port. Shuts down when dropped.
pub struct TestApp {
    pub addr: SocketAddr,
    pub in_flight: InFlight,
    shutdown: Shutdown,
    _site: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Write a minimal static site with an English root and a French page.
pub fn static_site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), ENGLISH_PAGE).unwrap();
    std::fs::create_dir(dir.path().join("fr")).unwrap();
    std::fs::write(dir.path().join("fr").join("index.html"), FRENCH_PAGE).unwrap();
    std::fs::write(dir.path().join("about.html"), "about").unwrap();
    dir
}

/// Default config pointed at a fresh static site.
pub fn test_config() -> (LandingConfig, TempDir) {
    let site = static_site();
    let mut config = LandingConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.site.static_dir = site.path().to_string_lossy().into_owned();
    (config, site)
}

pub async fn spawn_app(config: LandingConfig, site: TempDir, store: Arc<dyn ContactStore>) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::with_store(config, store).unwrap();
    let in_flight = server.state().in_flight.clone();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestApp {
        addr,
        in_flight,
        shutdown,
        _site: site,
    }
}

/// Spawn with default config and an in-memory store.
pub async fn spawn_default(store: Arc<MemoryStore>) -> TestApp {
    let (config, site) = test_config();
    spawn_app(config, site, store).await
}

/// Client that reports redirects instead of following them.
pub fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Store whose inserts wait until `gate` is notified.
pub struct GatedStore {
    pub inner: MemoryStore,
    pub gate: Notify,
}

#[async_trait]
impl ContactStore for GatedStore {
    async fn insert(&self, contact: &NewContact) -> Result<(), StoreError> {
        self.gate.notified().await;
        self.inner.insert(contact).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.inner.count().await
    }
}

/// Store whose inserts land only after `delay`.
pub struct SlowStore {
    pub inner: MemoryStore,
    pub delay: Duration,
}

#[async_trait]
impl ContactStore for SlowStore {
    async fn insert(&self, contact: &NewContact) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert(contact).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.inner.count().await
    }
}

/// Wait until no signup holds a claim.
pub async fn wait_until_settled(app: &TestApp) {
    for _ in 0..250 {
        if app.in_flight.is_empty() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("signup never settled");
}
