//! Shared utilities for integration testing: a mock of the three upstream
//! APIs and helpers to run the relay against it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use roblox_relay::config::RelayConfig;
use roblox_relay::{HttpServer, Shutdown};

pub const GROUP_A: u64 = 100;
pub const GROUP_B: u64 = 200;

/// Programmable stand-in for the users, groups and thumbnails APIs.
#[derive(Clone, Default)]
pub struct MockUpstream {
    /// Lowercased username → user id.
    pub users: HashMap<String, u64>,
    /// User id → (group id, role name) pairs, in response order.
    pub roles: HashMap<u64, Vec<(u64, String)>>,
    /// User id → image URL; `None` answers with a null `imageUrl`.
    pub thumbnails: HashMap<u64, Option<String>>,
    /// Force a status code from the users API.
    pub users_status: Option<u16>,
    /// Force a status code from the groups API.
    pub groups_status: Option<u16>,
    /// Force a status code from the thumbnails API.
    pub thumbnails_status: Option<u16>,
    /// Answer the users API with a body that is not JSON.
    pub users_malformed: bool,
    /// Hold every users API answer back this long.
    pub users_delay: Option<Duration>,
    /// Every body received by the users API.
    pub user_requests: Arc<Mutex<Vec<Value>>>,
}

impl MockUpstream {
    pub fn with_user(mut self, name: &str, id: u64) -> Self {
        self.users.insert(name.to_lowercase(), id);
        self
    }

    pub fn with_role(mut self, user_id: u64, group_id: u64, role: &str) -> Self {
        self.roles
            .entry(user_id)
            .or_default()
            .push((group_id, role.to_string()));
        self
    }

    pub fn with_thumbnail(mut self, user_id: u64, url: Option<&str>) -> Self {
        self.thumbnails.insert(user_id, url.map(str::to_string));
        self
    }
}

fn forced(status: u16) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, "upstream failure").into_response()
}

async fn users(State(mock): State<Arc<MockUpstream>>, Json(body): Json<Value>) -> Response {
    mock.user_requests.lock().unwrap().push(body.clone());
    if let Some(delay) = mock.users_delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(status) = mock.users_status {
        return forced(status);
    }
    if mock.users_malformed {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }

    let data: Vec<Value> = body["usernames"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .filter_map(|name| {
            mock.users.get(&name.to_lowercase()).map(|id| {
                json!({
                    "requestedUsername": name,
                    "hasVerifiedBadge": false,
                    "id": id,
                    "name": name,
                    "displayName": name,
                })
            })
        })
        .collect();
    Json(json!({ "data": data })).into_response()
}

async fn groups(State(mock): State<Arc<MockUpstream>>, Path(user_id): Path<u64>) -> Response {
    if let Some(status) = mock.groups_status {
        return forced(status);
    }
    let data: Vec<Value> = mock
        .roles
        .get(&user_id)
        .into_iter()
        .flatten()
        .map(|(group_id, role)| {
            json!({
                "group": { "id": group_id, "name": format!("Group {}", group_id), "memberCount": 10 },
                "role": { "id": 1, "name": role, "rank": 1 },
            })
        })
        .collect();
    Json(json!({ "data": data })).into_response()
}

async fn thumbnails(
    State(mock): State<Arc<MockUpstream>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(status) = mock.thumbnails_status {
        return forced(status);
    }
    assert_eq!(params.get("size").map(String::as_str), Some("150x150"));
    assert_eq!(params.get("format").map(String::as_str), Some("Png"));

    let user_id: u64 = params
        .get("userIds")
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    let data = match mock.thumbnails.get(&user_id) {
        Some(Some(url)) => json!([{ "targetId": user_id, "state": "Completed", "imageUrl": url }]),
        Some(None) => json!([{ "targetId": user_id, "state": "Blocked", "imageUrl": null }]),
        None => json!([]),
    };
    Json(json!({ "data": data })).into_response()
}

/// Serve the mock on an ephemeral loopback port.
pub async fn start_mock_upstream(mock: MockUpstream) -> SocketAddr {
    let app = Router::new()
        .route("/v1/usernames/users", post(users))
        .route("/v2/users/{user_id}/groups/roles", get(groups))
        .route("/v1/users/avatar-headshot", get(thumbnails))
        .with_state(Arc::new(mock));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// A loopback address with nothing listening on it.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Relay configuration pointing every upstream API at `upstream`.
pub fn relay_config(upstream: SocketAddr) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.users_url = format!("http://{}/v1/usernames/users", upstream);
    config.upstream.groups_url = format!("http://{}/v2/users/{{user_id}}/groups/roles", upstream);
    config.upstream.thumbnails_url = format!("http://{}/v1/users/avatar-headshot", upstream);
    config.groups.group_a_id = GROUP_A;
    config.groups.group_b_id = GROUP_B;
    config.timeouts.upstream_secs = 2;
    config.timeouts.connect_secs = 1;
    config
}

/// Start the relay; the returned `Shutdown` stops it.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    (addr, shutdown)
}

/// Mock upstream plus relay, wired together.
pub async fn start_stack(mock: MockUpstream) -> (String, Shutdown) {
    let upstream = start_mock_upstream(mock).await;
    let (addr, shutdown) = start_relay(relay_config(upstream)).await;
    (format!("http://{}", addr), shutdown)
}

/// Browser-like client: sends an Origin header and does not follow redirects.
pub fn client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.insert(ORIGIN, HeaderValue::from_static("https://example.com"));
    reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

pub fn assert_cors(response: &reqwest::Response) {
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*"),
        "missing permissive CORS header on {} response",
        response.status()
    );
}
