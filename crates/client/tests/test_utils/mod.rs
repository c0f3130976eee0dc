#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use serde::Deserialize;
use tokio::net::TcpListener;

use slotsync_client::config::SyncConfig;
use slotsync_client::synchronizer::SyncHandle;
use slotsync_core::models::availability::AvailableTimeResponse;

/// Query parameters the booking server expects on a slot lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotQuery {
    pub employee: String,
    pub service: String,
    pub date: String,
}

/// One canned answer the test endpoint hands out.
#[derive(Debug, Clone)]
pub struct ScriptedReply {
    pub delay: Duration,
    pub status: StatusCode,
    pub body: String,
}

impl ScriptedReply {
    pub fn slots(slots: &[&str]) -> Self {
        let response = AvailableTimeResponse {
            available_time: slots.iter().map(|slot| slot.to_string()).collect(),
        };
        Self {
            delay: Duration::ZERO,
            status: StatusCode::OK,
            body: serde_json::to_string(&response).expect("Failed to serialize scripted reply"),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            delay: Duration::ZERO,
            status,
            body: r#"{"error":"scripted failure"}"#.to_string(),
        }
    }

    pub fn raw(body: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct EndpointState {
    hits: AtomicUsize,
    queries: Mutex<Vec<SlotQuery>>,
    replies_by_date: Mutex<HashMap<String, ScriptedReply>>,
    fallback: Mutex<Option<ScriptedReply>>,
}

/// In-process stand-in for the booking server's availability route.
pub struct MockEndpoint {
    addr: SocketAddr,
    state: Arc<EndpointState>,
}

impl MockEndpoint {
    pub async fn start() -> Self {
        let state = Arc::new(EndpointState::default());
        let app = Router::new()
            .route("/get_available_time/", get(serve_slots))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock endpoint");
        let addr = listener.local_addr().expect("Failed to read mock endpoint address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock endpoint stopped unexpectedly");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> SyncConfig {
        SyncConfig::new(self.base_url())
    }

    /// Default answer for any lookup without a date-specific reply.
    pub fn set_slots(&self, slots: &[&str]) {
        self.set_reply(ScriptedReply::slots(slots));
    }

    pub fn set_reply(&self, reply: ScriptedReply) {
        *self.state.fallback.lock().unwrap() = Some(reply);
    }

    /// Scripted answer for lookups carrying this exact date value. Keyed
    /// by date so overlapping requests resolve deterministically no
    /// matter which one reaches the server first.
    pub fn reply_for_date(&self, date: &str, reply: ScriptedReply) {
        self.state
            .replies_by_date
            .lock()
            .unwrap()
            .insert(date.to_string(), reply);
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<SlotQuery> {
        self.state.queries.lock().unwrap().clone()
    }
}

async fn serve_slots(
    State(state): State<Arc<EndpointState>>,
    Query(query): Query<SlotQuery>,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let reply = {
        let by_date = state.replies_by_date.lock().unwrap();
        by_date
            .get(&query.date)
            .cloned()
            .or_else(|| state.fallback.lock().unwrap().clone())
            .unwrap_or_else(|| ScriptedReply::slots(&[]))
    };
    state.queries.lock().unwrap().push(query);

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

/// Polls until the time control shows exactly the expected options.
pub async fn wait_until_options(handle: &SyncHandle, expected: &[&str]) {
    for _ in 0..100 {
        let control = handle.time_control().await;
        if control.options() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let control = handle.time_control().await;
    panic!(
        "time control never showed {:?}, last saw {:?}",
        expected,
        control.options()
    );
}

/// Polls until the endpoint has served the expected number of lookups.
pub async fn wait_until_hits(endpoint: &MockEndpoint, expected: usize) {
    for _ in 0..100 {
        if endpoint.hits() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    panic!(
        "mock endpoint never reached {} lookups, last saw {}",
        expected,
        endpoint.hits()
    );
}
