use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;

use crate::app::{app, AppState};
use crate::database::{DatabaseError, MatchRepository};
use crate::models::{Match, MatchDetails, MatchPatch};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Match>,
    last_id: i32,
}

/// In-memory stand-in for the `matches` table. Ids come from a counter and are never reused.
#[derive(Default)]
pub struct MemoryMatchRepository {
    table: RwLock<Table>,
    calls: AtomicUsize,
}

impl MemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of storage operations issued so far (pings excluded)
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MatchRepository for MemoryMatchRepository {
    async fn list(&self) -> Result<Vec<Match>, DatabaseError> {
        self.record_call();
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Match>, DatabaseError> {
        self.record_call();
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, details: &MatchDetails) -> Result<Match, DatabaseError> {
        self.record_call();
        let mut table = self.table.write().await;
        table.last_id += 1;
        let record = Match::new(table.last_id, details.clone());
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn replace(
        &self,
        id: i32,
        details: &MatchDetails,
    ) -> Result<Option<Match>, DatabaseError> {
        self.record_call();
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|record| {
            record.home_team = details.home_team.clone();
            record.away_team = details.away_team.clone();
            record.match_date = details.match_date.clone();
            record.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        self.record_call();
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn apply_patch(&self, id: i32, patch: MatchPatch) -> Result<bool, DatabaseError> {
        self.record_call();
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(record) => {
                patch.apply(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Repository whose every call fails the way an unreachable database does.
pub struct FailingRepository;

fn unavailable() -> DatabaseError {
    DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl MatchRepository for FailingRepository {
    async fn list(&self) -> Result<Vec<Match>, DatabaseError> {
        Err(unavailable())
    }

    async fn find(&self, _id: i32) -> Result<Option<Match>, DatabaseError> {
        Err(unavailable())
    }

    async fn create(&self, _details: &MatchDetails) -> Result<Match, DatabaseError> {
        Err(unavailable())
    }

    async fn replace(
        &self,
        _id: i32,
        _details: &MatchDetails,
    ) -> Result<Option<Match>, DatabaseError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i32) -> Result<bool, DatabaseError> {
        Err(unavailable())
    }

    async fn apply_patch(&self, _id: i32, _patch: MatchPatch) -> Result<bool, DatabaseError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(unavailable())
    }
}

pub fn test_app(repo: Arc<dyn MatchRepository>) -> Router {
    app(AppState::new(repo))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("response is not JSON ({e}): {:?}", self.body))
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let body = body.map(|v| v.to_string()).unwrap_or_default();
    send_raw(app, method, uri, &body).await
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");

    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");

    TestResponse { status, headers, body }
}
