//! End-to-end session flows through the CLI commands.
//!
//! A scripted transport stands in for the API; the token store is a real
//! file in a temporary directory so restarts can be simulated.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

use unifind::{App, Cli, execute, hint};
use unifind_application::ports::{HttpTransport, Navigator, TransportError};
use unifind_domain::request::{AUTHORIZATION, FormPart, Headers, RequestBody};
use unifind_domain::{ApiRequest, ApiResponse, Claims, Role};
use unifind_infrastructure::{ClientConfig, ConsoleNavigator, FileStorage, SystemClock};

#[derive(Clone, Default)]
struct ScriptedApi {
    responses: Arc<Mutex<VecDeque<(u16, String)>>>,
    seen: Arc<Mutex<Vec<(String, ApiRequest)>>>,
}

impl ScriptedApi {
    fn reply(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
    }

    fn seen(&self) -> Vec<(String, ApiRequest)> {
        self.seen.lock().unwrap().clone()
    }
}

impl HttpTransport for ScriptedApi {
    async fn execute(
        &self,
        url: url::Url,
        request: &ApiRequest,
    ) -> Result<ApiResponse, TransportError> {
        self.seen
            .lock()
            .unwrap()
            .push((url.to_string(), request.clone()));
        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request");
        Ok(ApiResponse::new(
            status,
            Headers::new(),
            body.into_bytes(),
            Duration::from_millis(1),
        ))
    }
}

struct Env {
    dir: TempDir,
    api: ScriptedApi,
    config: ClientConfig,
}

impl Env {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let config = ClientConfig {
            api_base_url: "http://unifind.test".to_string(),
            storage_path: Some(dir.path().join("storage.json")),
            ..ClientConfig::default()
        };
        Self {
            dir,
            api: ScriptedApi::default(),
            config,
        }
    }

    /// Simulates a fresh process on `page`.
    async fn launch(&self, page: &str) -> (App<ScriptedApi>, Arc<ConsoleNavigator>) {
        let navigator = Arc::new(ConsoleNavigator::new(page));
        let storage = Arc::new(FileStorage::new(
            self.config.storage_path.clone().unwrap(),
        ));
        let app = App::new(
            self.api.clone(),
            &self.config,
            storage,
            navigator.clone(),
            Arc::new(SystemClock::new()),
        );
        app.start().await;
        (app, navigator)
    }

    fn storage_file(&self) -> String {
        std::fs::read_to_string(self.dir.path().join("storage.json")).unwrap_or_default()
    }
}

fn token(role: Role) -> String {
    Claims {
        user_id: "u1".to_string(),
        correo: "ana@uni.edu".to_string(),
        tipo: role,
        exp: Some(4_102_444_800),
    }
    .to_unsigned_token()
}

fn args(line: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("unifind").chain(line.iter().copied())).unwrap()
}

async fn run(app: &App<ScriptedApi>, line: &[&str]) -> unifind::CommandResult {
    execute(app, args(line).command).await
}

#[tokio::test]
async fn test_login_survives_restart() {
    let env = Env::new();
    let (app, _) = env.launch("/login").await;
    env.api
        .reply(200, &format!(r#"{{"token":"{}"}}"#, token(Role::Admin)));

    let out = run(&app, &["login", "-e", "ana@uni.edu", "-p", "s3creta"])
        .await
        .unwrap();
    assert_eq!(out, "Logged in as ana@uni.edu (admin)");
    assert!(env.storage_file().contains("\"token\""));

    let (restarted, _) = env.launch("/").await;
    let whoami = run(&restarted, &["whoami"]).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&whoami).unwrap();
    assert_eq!(parsed["status"], "authenticated");
    assert_eq!(parsed["user"]["email"], "ana@uni.edu");
    assert_eq!(parsed["user"]["role"], "admin");
}

#[tokio::test]
async fn test_expired_session_is_cleared_everywhere() {
    let env = Env::new();
    let (app, _) = env.launch("/login").await;
    env.api
        .reply(200, &format!(r#"{{"token":"{}"}}"#, token(Role::Admin)));
    run(&app, &["login", "-e", "ana@uni.edu", "-p", "x"])
        .await
        .unwrap();

    let (app, navigator) = env.launch("/admin/usuarios").await;
    env.api.reply(401, r#"{"detail":"Token expirado"}"#);

    let err = run(&app, &["users", "list"]).await.unwrap_err();

    assert_eq!(err.to_string(), "session expired, please log in again");
    assert_eq!(hint(&err), Some("run `unifind login` first"));
    assert_eq!(navigator.current_page(), "/login");
    assert!(!env.storage_file().contains("\"token\""));

    let (restarted, _) = env.launch("/").await;
    assert!(!restarted.auth().is_authenticated());
}

#[tokio::test]
async fn test_admin_command_without_session_sends_nothing() {
    let env = Env::new();
    let (app, _) = env.launch("/").await;

    let err = run(&app, &["users", "find", "--email", "ana@uni.edu"])
        .await
        .unwrap_err();

    assert_eq!(hint(&err), Some("run `unifind login` first"));
    assert!(env.api.seen().is_empty());
}

#[tokio::test]
async fn test_public_listing_never_carries_token() {
    let env = Env::new();
    let (app, _) = env.launch("/login").await;
    env.api
        .reply(200, &format!(r#"{{"token":"{}"}}"#, token(Role::Student)));
    run(&app, &["login", "-e", "ana@uni.edu", "-p", "x"])
        .await
        .unwrap();
    env.api.reply(200, "[]");

    let out = run(&app, &["lost", "list", "-q", "llaves"]).await.unwrap();

    assert_eq!(out, "[]");
    let (url, request) = env.api.seen().pop().unwrap();
    assert_eq!(url, "http://unifind.test/lost");
    assert!(!request.headers.contains(AUTHORIZATION));
}

#[tokio::test]
async fn test_claim_uploads_evidence_files() {
    let env = Env::new();
    let photo = env.dir.path().join("mochila.png");
    std::fs::write(&photo, [0x89, b'P', b'N', b'G']).unwrap();
    let (app, _) = env.launch("/objetos-perdidos").await;
    env.api.reply(
        200,
        r#"{"message":"Reclamo registrado","claim_id":"c1","status":"claimed"}"#,
    );

    let out = run(
        &app,
        &["lost", "claim", "a1", "-n", "Tiene mi nombre", "-f", photo.to_str().unwrap()],
    )
    .await
    .unwrap();

    assert!(out.contains("\"claim_id\": \"c1\""));
    let (url, request) = env.api.seen().pop().unwrap();
    assert_eq!(url, "http://unifind.test/lost/a1/claim");
    let RequestBody::Multipart(form) = request.body else {
        panic!("claim must be multipart");
    };
    let FormPart::File { name, file } = &form.parts()[0] else {
        panic!("first part must be the evidence file");
    };
    assert_eq!(name, "evidences");
    assert_eq!(file.file_name, "mochila.png");
    assert_eq!(file.content_type, "image/png");
}

#[tokio::test]
async fn test_logout_twice_is_fine() {
    let env = Env::new();
    let (app, _) = env.launch("/").await;

    assert_eq!(run(&app, &["logout"]).await.unwrap(), "Logged out");
    assert_eq!(run(&app, &["logout"]).await.unwrap(), "Logged out");
    assert!(env.api.seen().is_empty());
}

#[tokio::test]
async fn test_guard_command() {
    let env = Env::new();
    let (app, _) = env.launch("/").await;

    assert_eq!(
        run(&app, &["guard", "/admin/usuarios"]).await.unwrap(),
        "redirect to login"
    );
    assert_eq!(run(&app, &["guard", "/calendario"]).await.unwrap(), "allow");
}
