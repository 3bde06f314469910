//! In-process fake of the DailyNeeds API built on `tiny_http`.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use dn_client::ApiClient;
use dn_config::ApiConfig;

/// One canned response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    /// A successful envelope around `result`.
    pub fn envelope(result: serde_json::Value) -> Self {
        Self::json(
            200,
            serde_json::json!({
                "isAutheticated": true,
                "messageType": 1,
                "statusCode": 200,
                "message": "OK",
                "result": result
            }),
        )
    }

    #[must_use]
    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as the fake server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

type Routes = Arc<Mutex<HashMap<String, VecDeque<Reply>>>>;

/// Serves canned replies keyed by path (query string ignored).
///
/// Each path has a queue; replies are popped in order and the last one
/// repeats. Unknown paths answer 404.
pub struct FakeApi {
    server: Arc<tiny_http::Server>,
    base_url: String,
    routes: Routes,
    recorded: Arc<Mutex<Vec<Recorded>>>,
    worker: Option<JoinHandle<()>>,
}

impl FakeApi {
    pub fn start() -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind fake API"));
        let port = server
            .server_addr()
            .to_ip()
            .expect("fake API listens on TCP")
            .port();
        let routes: Routes = Arc::default();
        let recorded = Arc::new(Mutex::new(Vec::new()));

        let worker = {
            let server = Arc::clone(&server);
            let routes = Arc::clone(&routes);
            let recorded = Arc::clone(&recorded);
            std::thread::spawn(move || serve(&server, &routes, &recorded))
        };

        Self {
            server,
            base_url: format!("http://127.0.0.1:{port}/api"),
            routes,
            recorded,
            worker: Some(worker),
        }
    }

    /// Queue `reply` for `path` (relative to the base URL, e.g. `/items`).
    pub fn on(&self, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(format!("/api{path}"))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout_ms: 2_000,
            max_retries: 0,
            retry_delay_ms: 10,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).expect("client should build")
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        let full = format!("/api{path}");
        self.requests().iter().filter(|r| r.path() == full).count()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("at least one request")
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

fn serve(server: &tiny_http::Server, routes: &Routes, recorded: &Mutex<Vec<Recorded>>) {
    while let Ok(mut request) = server.recv() {
        let header = |name: &'static str| {
            request
                .headers()
                .iter()
                .find(|h| h.field.equiv(name))
                .map(|h| h.value.as_str().to_string())
        };
        let authorization = header("Authorization");
        let content_type = header("Content-Type");
        let mut body = String::new();
        let _ = request.as_reader().read_to_string(&mut body);

        let url = request.url().to_string();
        recorded.lock().unwrap().push(Recorded {
            method: request.method().as_str().to_string(),
            url: url.clone(),
            authorization,
            content_type,
            body,
        });

        let path = url.split('?').next().unwrap_or(&url).to_string();
        let reply = {
            let mut routes = routes.lock().unwrap();
            match routes.get_mut(&path) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        }
        .unwrap_or_else(|| Reply::json(404, serde_json::json!({ "message": "not found" })));

        // Delayed replies must not hold up the accept loop.
        std::thread::spawn(move || {
            std::thread::sleep(reply.delay);
            let response = tiny_http::Response::from_string(reply.body)
                .with_status_code(reply.status)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                );
            let _ = request.respond(response);
        });
    }
}
