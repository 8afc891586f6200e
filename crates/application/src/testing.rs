//! In-crate fakes for the ports.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use unifind_domain::request::Headers;
use unifind_domain::{ApiRequest, ApiResponse, Claims, Role};
use url::Url;

use crate::ports::{
    Clock, HttpTransport, KeyValueStorage, Navigator, StorageError, TransportError,
};

/// A request as the fake transport received it.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub url: String,
    pub request: ApiRequest,
}

impl SentRequest {
    pub fn authorization(&self) -> Option<&str> {
        self.request.headers.get(unifind_domain::request::AUTHORIZATION)
    }
}

#[derive(Default)]
struct TransportState {
    responses: VecDeque<Result<ApiResponse, TransportError>>,
    sent: Vec<SentRequest>,
}

/// Scripted transport. Answers in FIFO order; an empty script is a
/// connection failure.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<TransportState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_json(&self, status: u16, body: &str) {
        let response = ApiResponse::new(
            status,
            Headers::new(),
            body.as_bytes().to_vec(),
            Duration::from_millis(3),
        );
        self.state.lock().unwrap().responses.push_back(Ok(response));
    }

    pub fn fail(&self, error: TransportError) {
        self.state.lock().unwrap().responses.push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.state.lock().unwrap().sent.clone()
    }
}

impl HttpTransport for FakeTransport {
    async fn execute(&self, url: Url, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.sent.push(SentRequest {
            url: url.to_string(),
            request: request.clone(),
        });
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connection {
                    host: url.host_str().unwrap_or_default().to_string(),
                    message: "connection refused".to_string(),
                })
            })
    }
}

/// Map-backed storage; `failing()` rejects every call.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    failing: bool,
}

impl MemoryStorage {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.raw(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Navigator that records every navigation.
pub struct RecordingNavigator {
    page: Mutex<String>,
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn on(page: &str) -> Self {
        Self {
            page: Mutex::new(page.to_string()),
            visits: Mutex::new(Vec::new()),
        }
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_page(&self) -> String {
        self.page.lock().unwrap().clone()
    }

    fn navigate(&self, page: &str) {
        page.clone_into(&mut self.page.lock().unwrap());
        self.visits.lock().unwrap().push(page.to_string());
    }
}

/// Clock that only moves when told to.
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn at(timestamp: i64) -> Self {
        Self(Mutex::new(DateTime::from_timestamp(timestamp, 0).unwrap()))
    }

    pub fn advance(&self, secs: i64) {
        *self.0.lock().unwrap() += chrono::Duration::seconds(secs);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Mints an unsigned token for `email`.
pub fn token_for(user_id: &str, email: &str, role: Role, exp: Option<i64>) -> String {
    Claims {
        user_id: user_id.to_string(),
        correo: email.to_string(),
        tipo: role,
        exp,
    }
    .to_unsigned_token()
}

/// An auth stack over fakes, already initialised.
pub struct Fixture {
    pub transport: FakeTransport,
    pub auth: Arc<crate::auth::AuthService<FakeTransport>>,
}

impl Fixture {
    pub async fn anonymous() -> Self {
        let transport = FakeTransport::new();
        let ctx = crate::auth::SessionContext::new(
            crate::auth::TokenStore::new(Arc::new(MemoryStorage::default())),
            Arc::new(RecordingNavigator::on("/")),
        );
        let auth = crate::auth::AuthService::new(
            transport.clone(),
            "http://api.test",
            ctx,
            Arc::new(FixedClock::at(1_700_000_000)),
        );
        auth.init().await;
        Self {
            transport,
            auth: Arc::new(auth),
        }
    }

    pub async fn logged_in() -> Self {
        let fixture = Self::anonymous().await;
        let token = token_for("adm", "root@uni.edu", Role::Admin, None);
        fixture
            .transport
            .respond_json(200, &format!(r#"{{"token":"{token}"}}"#));
        fixture.auth.login("root@uni.edu", "secret").await.unwrap();
        fixture.transport.state.lock().unwrap().sent.clear();
        fixture
    }

    pub fn facade(&self) -> crate::auth::AuthenticatedClient<FakeTransport> {
        crate::auth::AuthenticatedClient::new(self.auth.clone())
    }
}

/// A lost item as the backend serialises it.
pub fn item_json(id: &str) -> String {
    format!(
        r#"{{"_id":"{id}","title":"Llaves","found_location":"Biblioteca","status":"available","created_at":"2024-03-01T10:00:00"}}"#
    )
}
