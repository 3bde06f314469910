//! Test doubles shared by the session tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use dn_auth::{KeyValueStore, MemoryStore, StoreError};
use dn_client::{ApiClient, TokenSink};
use dn_config::ApiConfig;
use dn_core::entities::{RecordId, User};
use dn_core::enums::Role;

pub fn customer() -> User {
    User {
        id: RecordId::from(1),
        mobile: "9876543210".into(),
        user_type: Role::Customer,
        name: None,
        address: None,
        is_active: true,
        created_at: "2024-01-01".into(),
    }
}

pub fn agent() -> User {
    User {
        id: RecordId::from("agent-7"),
        mobile: "9123456789".into(),
        user_type: Role::Agent,
        name: Some("Rajesh Kumar".into()),
        address: None,
        is_active: true,
        created_at: "2024-01-05".into(),
    }
}

/// Records the token pushed by the session manager.
#[derive(Debug, Default)]
pub struct RecordingSink {
    token: Mutex<Option<String>>,
}

impl TokenSink for RecordingSink {
    fn set_token(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.token.lock().unwrap() = None;
    }

    fn current_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

/// A [`MemoryStore`] whose writes to one key, or deletes, can be made to
/// fail, and whose next bulk read can be made to stall.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_set_on: Mutex<Option<&'static str>>,
    fail_delete: AtomicBool,
    stall_next_read: Mutex<Option<Duration>>,
}

impl FlakyStore {
    pub fn fail_writes_to(&self, key: &'static str) {
        *self.fail_set_on.lock().unwrap() = Some(key);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn stall_next_read(&self, delay: Duration) {
        *self.stall_next_read.lock().unwrap() = Some(delay);
    }

    pub fn heal(&self) {
        *self.fail_set_on.lock().unwrap() = None;
        self.fail_deletes(false);
    }

    fn injected() -> StoreError {
        StoreError::Io {
            path: "flaky".into(),
            source: std::io::Error::other("injected failure"),
        }
    }
}

impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let fail = *self.fail_set_on.lock().unwrap() == Some(key);
        if fail {
            return Err(Self::injected());
        }
        self.inner.set(key, value).await
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), StoreError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.delete(keys).await
    }

    async fn get_many(&self, keys: &[&str]) -> Result<HashMap<String, String>, StoreError> {
        let stall = self.stall_next_read.lock().unwrap().take();
        if let Some(delay) = stall {
            tokio::time::sleep(delay).await;
        }
        self.inner.get_many(keys).await
    }
}

/// Minimal fake API: one fixed reply per path, requests recorded.
pub struct FakeApi {
    server: Arc<tiny_http::Server>,
    base_url: String,
    recorded: Arc<Mutex<Vec<(String, Option<String>)>>>,
    worker: Option<JoinHandle<()>>,
}

impl FakeApi {
    pub fn start(routes: &[(&str, u16, serde_json::Value)]) -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind fake API"));
        let port = server.server_addr().to_ip().expect("tcp").port();
        let routes: HashMap<String, (u16, String)> = routes
            .iter()
            .map(|(path, status, body)| (format!("/api{path}"), (*status, body.to_string())))
            .collect();
        let recorded = Arc::new(Mutex::new(Vec::new()));

        let worker = {
            let server = Arc::clone(&server);
            let recorded = Arc::clone(&recorded);
            std::thread::spawn(move || {
                while let Ok(mut request) = server.recv() {
                    let authorization = request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Authorization"))
                        .map(|h| h.value.as_str().to_string());
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);
                    let url = request.url().to_string();
                    recorded.lock().unwrap().push((url.clone(), authorization));

                    let (status, body) = routes
                        .get(&url)
                        .cloned()
                        .unwrap_or((404, r#"{"message":"not found"}"#.to_string()));
                    let response = tiny_http::Response::from_string(body)
                        .with_status_code(status)
                        .with_header(
                            tiny_http::Header::from_bytes("Content-Type", "application/json")
                                .unwrap(),
                        );
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            base_url: format!("http://127.0.0.1:{port}/api"),
            recorded,
            worker: Some(worker),
        }
    }

    pub fn client(&self) -> Arc<ApiClient> {
        Arc::new(
            ApiClient::new(&ApiConfig {
                base_url: self.base_url.clone(),
                timeout_ms: 2_000,
                max_retries: 0,
                retry_delay_ms: 10,
            })
            .expect("client should build"),
        )
    }

    /// `(url, Authorization header)` for every request seen.
    pub fn requests(&self) -> Vec<(String, Option<String>)> {
        self.recorded.lock().unwrap().clone()
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
